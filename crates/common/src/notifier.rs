use async_trait::async_trait;

use crate::Result;

/// Abstraction over the alert delivery channel.
///
/// Fire-and-forget: the scanner logs a failed send and moves on — no retry,
/// no re-queue. `TelegramNotifier` implements this for production.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one pre-formatted Markdown message.
    async fn notify(&self, text: &str) -> Result<()>;
}
