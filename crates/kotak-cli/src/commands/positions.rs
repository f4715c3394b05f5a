//! Positions command implementation.

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};

use super::Context;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionKind {
    /// Positions taken today
    #[default]
    Todays,
    /// Open positions carried over
    Open,
    /// Stock holdings
    Stocks,
}

#[derive(Args, Debug)]
pub struct PositionsArgs {
    #[arg(value_enum, default_value_t = PositionKind::Todays)]
    pub kind: PositionKind,
}

pub async fn run(args: PositionsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let response = match args.kind {
        PositionKind::Todays => client.todays_positions().await,
        PositionKind::Open => client.open_positions().await,
        PositionKind::Stocks => client.stock_positions().await,
    }
    .context("Failed to fetch positions")?;

    ctx.print(&response)
}
