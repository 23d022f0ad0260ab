use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, warn};

use common::{Error, Notifier, Result};

/// Sends formatted signal alerts to one Telegram chat.
///
/// Delivery is fire-and-forget from the scanner's point of view: a failed
/// send surfaces as an `Error::Notify` which the caller logs and drops.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token.into()),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        debug!(chat_id = ?self.chat_id, "Sending Telegram alert");
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| {
                warn!(chat_id = ?self.chat_id, error = %e, "Telegram send failed");
                Error::Notify(e.to_string())
            })?;
        Ok(())
    }
}
