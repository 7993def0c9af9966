//! Telegram Bot API delivery (`sendMessage` with MarkdownV2).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quota_common::error::AppError;
use quota_common::format::{display_decimal, display_percent};
use quota_common::types::RatioAlert;

use crate::Notifier;

/// Characters MarkdownV2 requires to be escaped outside of entities.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    parse_mode: &'static str,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends alerts to one Telegram chat through a bot.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Render an alert as a MarkdownV2 message.
    pub fn render(alert: &RatioAlert) -> String {
        format!(
            "*Atualizações do preço patrimonial de {}*\n\n\
             Valor da cota patrimonial: R$ {}\n\
             Preço de mercado: R$ {}\n\
             Relação Mercado/Cota: *{}%*",
            escape_markdown_v2(&alert.asset),
            escape_markdown_v2(&display_decimal(alert.quota_value)),
            escape_markdown_v2(&display_decimal(alert.market_value)),
            escape_markdown_v2(&display_percent(alert.ratio)),
        )
    }
}

/// Escape every MarkdownV2 reserved character with a backslash.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, alert: &RatioAlert) -> Result<(), AppError> {
        let message = SendMessage {
            chat_id: &self.chat_id,
            parse_mode: "MarkdownV2",
            text: Self::render(alert),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => {
                tracing::info!(asset = %alert.asset, chat_id = %self.chat_id, "Telegram message sent");
                Ok(())
            }
            Some(ApiResponse {
                description: Some(description),
                ..
            }) => Err(AppError::Notification(format!(
                "Telegram answered {status}: {description}"
            ))),
            _ => Err(AppError::Notification(format!(
                "Telegram answered {status}: {}",
                body.trim()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "Telegram"
    }
}
