//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line client for the Kotak Securities trade API.
#[derive(Parser, Debug)]
#[command(name = "kotak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print responses as compact single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Where the session is cached (defaults to the platform data directory)
    #[arg(long, global = true, env = "KOTAK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Commands, positions::PositionKind};

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "kotak",
            "positions",
            "open",
            "-vv",
            "--compact",
            "--session-file",
            "/tmp/session.json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.compact);
        assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/session.json")));
        assert_eq!(cli.timeout, 30);
        match cli.command {
            Commands::Positions(args) => assert_eq!(args.kind, PositionKind::Open),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn login_requires_credentials() {
        let result = Cli::try_parse_from(["kotak", "login", "--user-id", "AB1234"]);
        assert!(result.is_err());
    }

    #[test]
    fn cancel_takes_bare_order_id() {
        let cli = Cli::try_parse_from(["kotak", "order", "cancel", "ORD123"]).unwrap();
        assert!(matches!(cli.command, Commands::Order(_)));
    }
}
