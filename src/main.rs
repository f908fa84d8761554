//! HTTP server for the PAYE engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use paye_engine::api::{AppState, create_router};
use paye_engine::config::ConfigLoader;

/// Serve net pay calculations over HTTP.
#[derive(Debug, Parser)]
#[command(name = "paye-engine", version, about)]
struct Cli {
    /// Directory holding jurisdiction.yaml and schedules/.
    #[arg(long, env = "PAYE_CONFIG_DIR", default_value = "./config/ug_paye")]
    config_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "PAYE_BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match ConfigLoader::load(&cli.config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(config_dir = %cli.config_dir.display(), "{e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!(
        jurisdiction = %config.jurisdiction().code,
        schedules = config.config().schedules().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&cli.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(bind = %cli.bind, "failed to bind listener: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("paye-engine listening on {}", cli.bind);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
