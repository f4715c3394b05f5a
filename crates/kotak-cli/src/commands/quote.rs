//! Quote command implementation.

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};

use super::Context;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// Full quote
    Full,
    /// Last traded price
    Ltp,
    /// Market depth
    Depth,
    /// Open, high, low and close
    Ohlc,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Instrument token
    pub instrument: String,

    #[arg(long, value_enum, default_value_t = QuoteKind::Full)]
    pub kind: QuoteKind,
}

pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let id = args.instrument.as_str();

    let response = match args.kind {
        QuoteKind::Full => client.quote(id).await,
        QuoteKind::Ltp => client.quote_ltp(id).await,
        QuoteKind::Depth => client.quote_depth(id).await,
        QuoteKind::Ohlc => client.quote_ohlc(id).await,
    }
    .context("Failed to fetch quote")?;

    ctx.print(&response)
}
