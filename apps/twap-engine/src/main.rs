//! TWAP Engine Binary
//!
//! # Usage
//!
//! ```bash
//! twap twap BTCUSDT BUY 1.0 60000 4 60 --dry-run
//! twap --config twap.yaml twap BTCUSDT BUY 1.0 60000 4 60
//! twap --simulate market ETHUSDT SELL 0.5
//! ```
//!
//! # Environment Variables
//!
//! - `BINANCE_API_KEY`, `BINANCE_API_SECRET`: venue credentials (live runs only)
//! - `RUST_LOG`: log filter, overrides the configured level
//!
//! Ctrl+C or SIGTERM during a TWAP run stops it at the next wait and prints
//! the partial report. A second signal exits at once with code 3.

use std::process::ExitCode;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use twap_engine::application::services::OutputFormat;
use twap_engine::cli::{self, Cli};
use twap_engine::config::Config;
use twap_engine::error::{AppError, EXIT_PARTIAL};
use twap_engine::telemetry::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    let cli = Cli::parse();
    let format = OutputFormat::from(cli.output);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_error(&AppError::from(e), format),
    };

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => return report_error(&AppError::from(e), format),
    };

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    match cli::execute(&cli, &config, cancel).await {
        Ok(outcome) => {
            print!("{}", outcome.rendered);
            if !outcome.rendered.ends_with('\n') {
                println!();
            }
            ExitCode::from(outcome.exit_code)
        }
        Err(e) => report_error(&e, format),
    }
}

fn report_error(error: &AppError, format: OutputFormat) -> ExitCode {
    tracing::error!(code = %error.code(), error = %error, "Invocation failed");
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&error.to_response()) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error: {error}"),
        },
        OutputFormat::Text => eprintln!("Error: {error}"),
    }
    ExitCode::from(error.exit_code())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Cancel `token` on the first SIGINT or SIGTERM; exit on the second.
async fn shutdown_signal(token: CancellationToken) {
    let second = cli::shutdown::escalate(token, next_signal).await;
    tracing::warn!(signal = second, "Second signal received, exiting immediately");
    std::process::exit(i32::from(EXIT_PARTIAL));
}

/// Resolve on the next SIGINT or SIGTERM.
async fn next_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
