use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use aviary_api::rate_limit::spawn_sweeper;
use aviary_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "aviary-api")]
#[command(about = "Multi-tenant agent management platform API")]
struct Args {
    /// Port to listen on (overrides PORT env)
    #[arg(short, long)]
    port: Option<u16>,

    /// Skip the background sweep of expired rate-limit buckets
    #[arg(long)]
    no_sweep: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ADMIN_API_TOKEN, PORT, etc.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = aviary_api::config::config();
    tracing::info!("starting Aviary API in {:?} mode", config.environment);

    let state = AppState::new(config);

    if config.api.enable_rate_limiting && !args.no_sweep {
        spawn_sweeper(
            state.store.clone(),
            Duration::from_secs(config.api.sweep_interval_secs),
        );
    }

    let app = aviary_api::app(state);

    // Allow tests or deployments to override port via env
    let port = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()))
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
