use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use chat_matchmaker::adapters::{
    build_router, ChatHandlers, IpInfoConfig, IpInfoResolver, UnknownGeoResolver,
};
use chat_matchmaker::application::{IdleReaper, MatchmakingCoordinator};
use chat_matchmaker::config::{AppConfig, GeolocationConfig, ServerConfig};
use chat_matchmaker::ports::GeoResolver;
use tokio::sync::watch;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(&config.server);

    info!(
        environment = ?config.server.environment,
        production = config.is_production(),
        "Starting chat matchmaker"
    );

    let geo_resolver = build_geo_resolver(&config.geolocation)?;
    let coordinator = Arc::new(MatchmakingCoordinator::new(geo_resolver));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper_handle = config.chat.idle_reaper_config().map(|reaper_config| {
        let reaper = IdleReaper::new(coordinator.clone(), reaper_config);
        tokio::spawn(async move { reaper.run(shutdown_rx).await })
    });

    let handlers = ChatHandlers::new(coordinator)
        .with_max_message_length(config.chat.max_message_length);
    let app = build_router(handlers, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = reaper_handle {
        let _ = handle.await;
    }

    info!("Shut down cleanly");
    Ok(())
}

fn build_geo_resolver(config: &GeolocationConfig) -> Result<Arc<dyn GeoResolver>, BoxError> {
    if !config.enabled {
        info!("Geolocation disabled, locations will be recorded as unknown");
        return Ok(Arc::new(UnknownGeoResolver));
    }

    let resolver = IpInfoResolver::new(IpInfoConfig::new(
        config.base_url.clone(),
        config.timeout(),
    ))?;
    Ok(Arc::new(resolver))
}

fn init_logging(server: &ServerConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let file_layer = server.log_file.as_deref().map(|log_file| {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "chat-matchmaker.log".into());

        std::fs::create_dir_all(dir).ok();

        let file_appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Leak the guard to keep it alive for the entire program
        Box::leak(Box::new(guard));

        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_line_number(true)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| server.log_level.clone().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
