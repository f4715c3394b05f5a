//! Login command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use kotak::types::DEFAULT_BASE_URL;
use kotak::{BaseUrl, Config, Credentials, KotakClient};

use crate::output;
use crate::session::storage::{self, StoredSession};

use super::Context;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Trading account user id
    #[arg(long, env = "KOTAK_USER_ID")]
    pub user_id: String,

    /// Trading account password
    #[arg(long, env = "KOTAK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Registered application id
    #[arg(long, env = "KOTAK_APP_ID")]
    pub app_id: String,

    /// API consumer key
    #[arg(long, env = "KOTAK_CONSUMER_KEY")]
    pub consumer_key: String,

    /// API consumer secret
    #[arg(long, env = "KOTAK_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// One-time access code
    #[arg(long, env = "KOTAK_ACCESS_CODE", hide_env_values = true)]
    pub access_code: String,

    /// Trade API base URL
    #[arg(long, env = "KOTAK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let base_url = BaseUrl::new(&args.base_url).context("Invalid base URL")?;
    let credentials = Credentials::new(
        &args.user_id,
        args.password,
        args.app_id,
        args.consumer_key,
        args.secret_key,
        args.access_code,
    );
    let config = Config::new(credentials)
        .with_base_url(base_url.clone())
        .with_timeout(ctx.timeout);

    eprintln!("{}", "Logging in...".dimmed());

    let client = KotakClient::connect(config)
        .await
        .context("Failed to login")?;
    let state = client
        .session()
        .await
        .context("Handshake completed without a session")?;

    let stored = StoredSession::new(&base_url, &args.user_id, &state);
    storage::save_session(&ctx.session_file, &stored).context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &args.user_id);
    output::field("API", base_url.as_str());

    Ok(())
}
