//! Subcommand implementations.

mod login;
mod logout;
pub mod order;
pub mod positions;
pub mod quote;
pub mod report;
mod whoami;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use serde_json::Value;

use kotak::KotakClient;

use crate::cli::Cli;
use crate::output;
use crate::session::storage;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub session_file: PathBuf,
    pub timeout: Duration,
    pub compact: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let session_file = match &cli.session_file {
            Some(path) => path.clone(),
            None => storage::default_session_path()?,
        };
        Ok(Self {
            session_file,
            timeout: Duration::from_secs(cli.timeout),
            compact: cli.compact,
        })
    }

    /// A client for the cached session.
    pub fn client(&self) -> Result<KotakClient> {
        let stored = storage::load_session(&self.session_file)
            .context("Failed to load session")?
            .context("No active session. Run 'kotak login' first.")?;
        stored.into_client(self.timeout)
    }

    /// Print an API response.
    pub fn print(&self, value: &Value) -> Result<()> {
        if self.compact {
            output::json(value)
        } else {
            output::json_pretty(value)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the session handshake and cache the session
    Login(login::LoginArgs),

    /// Display the cached session
    Whoami(whoami::WhoamiArgs),

    /// Remove the cached session
    Logout(logout::LogoutArgs),

    /// Place, modify or cancel orders
    #[command(subcommand)]
    Order(order::OrderCommand),

    /// Show positions
    Positions(positions::PositionsArgs),

    /// Show order and trade reports
    #[command(subcommand)]
    Report(report::ReportCommand),

    /// Fetch market quotes for an instrument
    Quote(quote::QuoteArgs),
}

pub async fn handle(cmd: Commands, ctx: &Context) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args, ctx).await,
        Commands::Whoami(args) => whoami::run(args, ctx).await,
        Commands::Logout(args) => logout::run(args, ctx).await,
        Commands::Order(cmd) => order::handle(cmd, ctx).await,
        Commands::Positions(args) => positions::run(args, ctx).await,
        Commands::Report(cmd) => report::handle(cmd, ctx).await,
        Commands::Quote(args) => quote::run(args, ctx).await,
    }
}
