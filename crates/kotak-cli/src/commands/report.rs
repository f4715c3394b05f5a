//! Order and trade reports.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::Context;

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Order book, or one order's history
    Orders(ReportArgs),

    /// Trade book, or the trades for one order
    Trades(ReportArgs),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Restrict the report to a single order
    #[arg(long)]
    pub id: Option<String>,
}

pub async fn handle(cmd: ReportCommand, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let response = match cmd {
        ReportCommand::Orders(ReportArgs { id: None }) => client.orders().await,
        ReportCommand::Orders(ReportArgs { id: Some(id) }) => client.order_by_id(&id).await,
        ReportCommand::Trades(ReportArgs { id: None }) => client.trades().await,
        ReportCommand::Trades(ReportArgs { id: Some(id) }) => client.trade_by_id(&id).await,
    }
    .context("Failed to fetch report")?;

    ctx.print(&response)
}
