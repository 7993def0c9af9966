//! Notification delivery.
//!
//! The engine hands over a [`RatioAlert`] and a channel decides how to render
//! and deliver it. Delivery failures propagate to the caller; nothing is retried.

pub mod telegram;

use async_trait::async_trait;

use quota_common::error::AppError;
use quota_common::types::RatioAlert;

pub use telegram::TelegramNotifier;

/// A destination for ratio alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render and deliver one alert.
    async fn send(&self, alert: &RatioAlert) -> Result<(), AppError>;

    /// Human-readable name for this channel (e.g., "Telegram").
    fn name(&self) -> &'static str;
}
