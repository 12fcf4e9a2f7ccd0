//! Application layer - Commands and the services that run them.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod coordinator;
pub mod idle_reaper;

pub use coordinator::{ConnectCommand, MatchmakingCoordinator, SendMessageCommand};
pub use idle_reaper::{IdleReaper, IdleReaperConfig};
