//! Equity ratio crawler entrypoint.
//!
//! Compares each tracked fund's latest equity quota against its market price
//! and sends a Telegram message when the premium is below the fund's target.
//! Meant to be started by a scheduler; any failure exits non-zero.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quota_common::config::{AppConfig, Credentials};
use quota_engine::{Orchestrator, RunSummary};
use quota_notifier::TelegramNotifier;
use quota_sheets::GoogleSheetsSource;

const DEFAULT_LOG_FILTER: &str =
    "equity_ratio_crawler=info,quota_engine=info,quota_sheets=info,quota_notifier=info";

#[derive(Parser)]
#[command(name = "equity-ratio-crawler")]
#[command(about = "Crawl equity quota/value ratio and send Telegram messages")]
struct Cli {
    /// Google API credential token
    #[arg(short = 'g', long = "google", env = "GOOGLE_API_KEY", hide_env_values = true)]
    google: String,

    /// Telegram bot token
    #[arg(short = 't', long = "telegram", env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    telegram: String,

    /// Telegram chat ID
    #[arg(short = 'c', long = "chat", env = "TELEGRAM_CHAT_ID", allow_hyphen_values = true)]
    chat: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Let a .env file feed the clap env fallbacks
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if cli.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    ExitCode::from(exit_status(run(cli).await))
}

/// Load configuration and drive one run of the pipeline.
async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = AppConfig::from_env(Credentials {
        google_api_key: cli.google,
        telegram_bot_token: cli.telegram,
        telegram_chat_id: cli.chat,
    })?;

    let source = Arc::new(GoogleSheetsSource::new(
        config.sheets_api_url.clone(),
        config.credentials.google_api_key.clone(),
    ));
    let notifier = Arc::new(TelegramNotifier::new(
        config.telegram_api_url.clone(),
        config.credentials.telegram_bot_token.clone(),
        config.credentials.telegram_chat_id.clone(),
    ));

    let orchestrator = Orchestrator::new(
        source,
        notifier,
        config.market_source.clone(),
        config.assets.clone(),
    );

    Ok(orchestrator.run().await?)
}

/// Log the outcome exactly once and map it to the process exit status.
fn exit_status(result: anyhow::Result<RunSummary>) -> u8 {
    match result {
        Ok(summary) => {
            tracing::info!(
                evaluated = summary.evaluated(),
                notified = summary.notified(),
                "🏁 Script is done"
            );
            0
        }
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(error = %message, "Run aborted");
            1
        }
    }
}
