// ============================
// crates/backend-bin/src/main.rs
// ============================
//! Tokio / Axum entry-point for the authapp backend.

use authapp_backend_lib::{config::Settings, router, AppState};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "authapp-backend", version, about = "Email/password auth backend")]
struct Args {
    /// Path to an explicit settings file (toml, yaml or json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        // No explicit file: working-directory config + env, falling back to
        // the shipped defaults file
        None => Settings::load().or_else(|_| Settings::load_from("config/default.toml"))?,
    };
    if let Some(addr) = args.listen {
        settings.bind_addr = addr;
    }
    settings.validate()?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings));
    seed_demo_user(&state).await?;

    let app = router::create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the demo account so the frontend has something to log in with
async fn seed_demo_user(state: &AppState) -> anyhow::Result<()> {
    let user = state
        .users
        .create("test@example.com", "Test User", "password123")
        .await?;
    debug!(user_id = %user.id, "seeded demo user");
    Ok(())
}
