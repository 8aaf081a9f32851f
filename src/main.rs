use anyhow::Result;
use avatarcast::{create_router, AppState, CollaboratorRegistry, Config, SessionManager};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "avatarcast", about = "Avatar broadcast session orchestrator")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/avatarcast")]
    config: String,

    /// Override the HTTP port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} starting", cfg.service.name);

    let registry = Arc::new(CollaboratorRegistry::simulated());
    let manager = Arc::new(SessionManager::new(registry, cfg.stream.clone()));

    let app = create_router(AppState::new(manager));

    let listener =
        tokio::net::TcpListener::bind((cfg.service.http.bind.as_str(), port)).await?;
    info!("HTTP server listening on {}:{}", cfg.service.http.bind, port);

    axum::serve(listener, app).await?;

    Ok(())
}
