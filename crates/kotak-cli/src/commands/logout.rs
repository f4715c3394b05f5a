//! Logout command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

use super::Context;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, ctx: &Context) -> Result<()> {
    let removed = storage::clear_session(&ctx.session_file).context("Failed to remove session")?;

    if removed {
        output::success("Session removed");
    } else {
        output::success("No active session");
    }

    Ok(())
}
