//! Crop Management Portal - Backend Server

use std::net::SocketAddr;

use crop_portal_backend::{
    config::{LogFormat, LoggingConfig},
    create_app, AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting Crop Management Portal Server");
    tracing::info!("Environment: {}", config.environment);

    let state = AppState::new(config.clone());

    // The store may be down at startup; operations report it when it is.
    if config.database.ensure_schema {
        if let Err(e) = state.db.ensure_schema().await {
            tracing::warn!("Could not prepare crops table: {}", e);
        }
    }

    // Build application
    let app = create_app(state);

    // Start server
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "crop_portal_backend=debug,crop_portal_server=debug,tower_http=debug,sqlx=warn".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
