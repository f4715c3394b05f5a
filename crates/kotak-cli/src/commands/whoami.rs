//! Whoami command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

use super::Context;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, ctx: &Context) -> Result<()> {
    let stored = storage::load_session(&ctx.session_file)
        .context("Failed to load session")?
        .context("No active session. Run 'kotak login' first.")?;

    output::field("User", &stored.user_id);
    output::field("Consumer key", &stored.consumer_key);
    output::field("API", &stored.base_url);
    output::field("Session file", &ctx.session_file.display().to_string());

    Ok(())
}
