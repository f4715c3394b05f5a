//! kotak - command-line client for the Kotak Securities trade API.
//!
//! A thin wrapper over the `kotak` library. `kotak login` runs the session
//! handshake once and caches the session; every other command reuses it.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; credentials may come from flags or the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    if let Err(err) = run(cli).await {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = commands::Context::from_cli(&cli)?;
    commands::handle(cli.command, &ctx).await
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output on stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
