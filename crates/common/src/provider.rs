use async_trait::async_trait;

use crate::{Candle, Result};

/// Abstraction over the candle data source.
///
/// `YahooClient` in `crates/scanner` implements this for production; tests
/// substitute canned sequences. Implementations must return candles ordered
/// ascending by timestamp, with the final candle fully closed — a bar whose
/// bucket has not ended at fetch time must be trimmed before returning.
///
/// A provider-side error envelope (e.g. a JSON error payload in place of
/// data) is a fetch failure (`Error::Provider`), never a parse crash.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch recent candles for one instrument.
    ///
    /// `interval` and `range` use the provider's notation (e.g. "15m", "2d").
    async fn fetch_candles(&self, symbol: &str, interval: &str, range: &str)
        -> Result<Vec<Candle>>;
}
