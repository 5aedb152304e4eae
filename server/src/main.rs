//! Entry point: configuration, logging, shared state, serve.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use poker_server::ai::DeepSeekClient;
use poker_server::cli::ServerCli;
use poker_server::config::Settings;
use poker_server::rooms::RoomManager;
use poker_server::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ServerCli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::load().context("loading configuration")?;
    if settings.deepseek_api_key.is_none() {
        tracing::warn!("no DEEPSEEK_API_KEY configured; automated seats fall back to check/call/fold");
    }

    let ai = Arc::new(DeepSeekClient::new(&settings).context("creating the AI adapter")?);
    let manager = Arc::new(RoomManager::new(settings, ai));
    let state = AppState { manager };

    server::run_server(cli.addr, state).await
}
