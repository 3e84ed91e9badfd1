//! `cheer` entry point
//!
//! Run with:
//! ```bash
//! cargo run -p cheer-cli -- stats 1 2 3
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use clap::Parser;
use tracing::{debug, error};

use cheer_cli::{commands, create_service_context, Cli};
use cheer_common::{try_init_tracing_with_config, AppConfig, AppResult, ErrorResponse, TracingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let tracing = if cli.verbose {
        TracingConfig::development()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing_with_config(tracing) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let json = cli.json;
    if let Err(e) = run(cli).await {
        error!(error = %e, code = e.error_code(), "Command failed");
        if json {
            let response = ErrorResponse::from(&e);
            match serde_json::to_string(&response) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("error: {e}"),
            }
        } else {
            eprintln!("error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env()?;
    debug!(env = ?config.app.env, backend = ?config.store.backend, "Configuration loaded");

    let ctx = create_service_context(&config)?;
    commands::run(cli.command, &ctx, cli.json).await
}
