use crate::assets::{self, MARKET_RANGE, MARKET_SPREADSHEET_ID};
use crate::types::{AssetDefinition, SourceRef};

/// Default Google Sheets v4 API base URL.
const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

/// Default Telegram Bot API base URL.
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Opaque credentials handed over by the host (CLI flags or environment).
/// Never inspected, only passed through.
#[derive(Clone)]
pub struct Credentials {
    /// Google API credential used for spreadsheet reads
    pub google_api_key: String,
    /// Telegram bot token
    pub telegram_bot_token: String,
    /// Telegram chat that receives the alerts
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Global application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,

    /// Google Sheets API base URL (default: public v4 endpoint)
    pub sheets_api_url: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Shared market value table
    pub market_source: SourceRef,

    /// Assets evaluated on every run, in order
    pub assets: Vec<AssetDefinition>,
}

impl AppConfig {
    /// Load the tunables from environment variables around the given credentials.
    pub fn from_env(credentials: Credentials) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            credentials,
            sheets_api_url: std::env::var("SHEETS_API_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_API_URL.to_string()),
            telegram_api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string()),
            market_source: SourceRef::new(
                std::env::var("MARKET_SPREADSHEET_ID")
                    .unwrap_or_else(|_| MARKET_SPREADSHEET_ID.to_string()),
                std::env::var("MARKET_RANGE").unwrap_or_else(|_| MARKET_RANGE.to_string()),
            ),
            assets: assets::default_assets(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject duplicate asset names. Credentials are opaque and pass through as given.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (i, asset) in self.assets.iter().enumerate() {
            if self.assets[..i].iter().any(|a| a.name == asset.name) {
                anyhow::bail!("asset {} is configured more than once", asset.name);
            }
        }

        Ok(())
    }
}
