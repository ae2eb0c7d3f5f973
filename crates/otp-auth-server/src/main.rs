//! OTP verification server - Entry point.

use anyhow::Context;
use otp_auth_server::{
    api::{cors_layer, create_router_with_cors, AppState},
    config::{Config, LogConfig},
    sms::build_sender,
    OtpService, OtpStore, SessionStore,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log);

    info!("Starting OTP verification server");

    let sender = build_sender(&config.twilio)?;
    let from_number = config.twilio.sender_number()?;

    let service = OtpService::new(
        Arc::new(OtpStore::new()),
        Arc::new(SessionStore::new()),
        sender,
        from_number,
        config.twilio.timeout,
    );
    let state = AppState::new(service);

    let origins = config.cors.origins();
    info!(?origins, "CORS origins configured");
    let app = create_router_with_cors(state, cors_layer(&origins));

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or_else(|_| {
            warn!(listen_addr = %config.server.listen_addr, "Invalid listen address, using 0.0.0.0");
            [0, 0, 0, 0].into()
        }),
        config.server.port,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
