use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{Candle, Error, QuoteProvider, Result};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance v8 chart API client.
///
/// Unauthenticated. A populated `chart.error` envelope or an empty result
/// array is reported as `Error::Provider`, never a parse crash. Null slots
/// in the OHLC arrays (empty buckets) are skipped, and a still-forming
/// final bar is trimmed so callers only ever see closed bars.
pub struct YahooClient {
    http: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                // Yahoo rejects requests without a browser-ish user agent.
                .user_agent("Mozilla/5.0 (X11; Linux x86_64)")
                .timeout(Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Map "EURUSD" to Yahoo's "EURUSD=X" unless already a Yahoo ticker.
    pub fn yahoo_symbol(symbol: &str) -> String {
        let s = symbol.to_uppercase();
        if s.ends_with("=X") {
            s
        } else {
            format!("{s}=X")
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for YahooClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Candle>> {
        let ticker = Self::yahoo_symbol(symbol);
        let url =
            format!("{BASE_URL}/v8/finance/chart/{ticker}?interval={interval}&range={range}");

        debug!(symbol, %ticker, interval, range, "Fetching candles");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Provider(format!("{ticker}: HTTP {status}: {body}")));
        }

        let mut candles = parse_chart(&ticker, &body)?;
        trim_forming_bar(&mut candles, interval, Utc::now());
        Ok(candles)
    }
}

/// Parse a chart API body into an ascending candle sequence.
fn parse_chart(ticker: &str, body: &str) -> Result<Vec<Candle>> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| Error::Provider(format!("{ticker}: {e}")))?;

    if let Some(err) = resp.chart.error {
        return Err(Error::Provider(format!(
            "{ticker}: {}: {}",
            err.code, err.description
        )));
    }

    let result = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| Error::Provider(format!("{ticker}: empty chart result")))?;
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| Error::Provider(format!("{ticker}: no quote block")))?;

    let mut candles: Vec<Candle> = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let slot = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = slot else {
            continue; // empty bucket
        };
        let Some(timestamp) = Utc.timestamp_opt(ts, 0).single() else {
            continue;
        };
        // Keep the sequence strictly ascending.
        if candles.last().is_some_and(|c: &Candle| c.timestamp >= timestamp) {
            continue;
        }
        candles.push(Candle {
            timestamp,
            open,
            high,
            low,
            close,
        });
    }
    Ok(candles)
}

fn value_at(slots: &[Option<f64>], i: usize) -> Option<f64> {
    slots.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Drop the final candle when its bucket has not ended yet, so the rule
/// layer only ever evaluates closed bars.
fn trim_forming_bar(candles: &mut Vec<Candle>, interval: &str, now: DateTime<Utc>) {
    let Some(secs) = interval_secs(interval) else {
        return;
    };
    if let Some(last) = candles.last() {
        if last.timestamp + chrono::Duration::seconds(secs) > now {
            candles.pop();
        }
    }
}

/// Bucket size in seconds for Yahoo interval notation ("5m", "1h", "1d").
fn interval_secs(interval: &str) -> Option<i64> {
    let (num, unit) = interval.split_at(interval.len().checked_sub(1)?);
    let n: i64 = num.parse().ok()?;
    match unit {
        "m" => Some(n * 60),
        "h" => Some(n * 3_600),
        "d" => Some(n * 86_400),
        _ => None,
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1700000000, 1700000900, 1700001800],
                "indicators": {
                    "quote": [{
                        "open":  [1.05, 1.06, 1.07],
                        "high":  [1.055, 1.065, 1.075],
                        "low":   [1.045, 1.055, 1.065],
                        "close": [1.052, 1.062, 1.072]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_well_formed_chart() {
        let candles = parse_chart("EURUSD=X", SAMPLE).unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[1].close, 1.062);
        assert!(candles.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn error_envelope_is_a_provider_error() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        let err = parse_chart("XXXYYY=X", body).unwrap_err();
        assert!(err.to_string().contains("Not Found"), "{err}");
    }

    #[test]
    fn empty_result_is_a_provider_error() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(parse_chart("EURUSD=X", body).is_err());
    }

    #[test]
    fn null_buckets_are_skipped() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1700000000, 1700000900, 1700001800],
                    "indicators": {
                        "quote": [{
                            "open":  [1.05, null, 1.07],
                            "high":  [1.055, null, 1.075],
                            "low":   [1.045, null, 1.065],
                            "close": [1.052, null, 1.072]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let candles = parse_chart("EURUSD=X", body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].open, 1.07);
    }

    #[test]
    fn forming_bar_is_trimmed() {
        let mut candles = parse_chart("EURUSD=X", SAMPLE).unwrap();
        // "Now" is one minute into the last bar's 15m bucket.
        let now = Utc.timestamp_opt(1_700_001_860, 0).unwrap();
        trim_forming_bar(&mut candles, "15m", now);
        assert_eq!(candles.len(), 2);

        // Once the bucket has ended, nothing is trimmed.
        let mut candles = parse_chart("EURUSD=X", SAMPLE).unwrap();
        let later = Utc.timestamp_opt(1_700_002_700, 0).unwrap();
        trim_forming_bar(&mut candles, "15m", later);
        assert_eq!(candles.len(), 3);
    }

    #[test]
    fn symbol_mapping_appends_suffix_once() {
        assert_eq!(YahooClient::yahoo_symbol("eurusd"), "EURUSD=X");
        assert_eq!(YahooClient::yahoo_symbol("GBPUSD=X"), "GBPUSD=X");
    }

    #[test]
    fn interval_notation_parses() {
        assert_eq!(interval_secs("15m"), Some(900));
        assert_eq!(interval_secs("1h"), Some(3_600));
        assert_eq!(interval_secs("1d"), Some(86_400));
        assert_eq!(interval_secs("weird"), None);
    }
}
