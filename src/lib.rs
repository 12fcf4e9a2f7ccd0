//! Chat Matchmaker - Anonymous one-to-one chat pairing service
//!
//! This crate pairs anonymous users for text chat by shared interest tags
//! and relays their messages through per-user queues that clients poll
//! over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
