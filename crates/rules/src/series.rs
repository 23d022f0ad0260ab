use common::Candle;
use indicators::{adx, atr, ema, macd, rsi};

use crate::config::RuleConfig;

/// All indicator readings for one bar index.
///
/// Disabled filters read NaN; callers check finiteness before acting.
#[derive(Debug, Clone, Copy)]
pub struct BarSnapshot {
    pub candle: Candle,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub atr: f64,
    pub macd_histogram: f64,
    pub adx: f64,
}

/// Candles plus every indicator series the rule reads, aligned 1:1.
///
/// Construction fails (returns `None`) when the sequence is shorter than
/// the rule's warm-up requirement, so `current()` and `previous()` are
/// always in bounds — there is no way to index before the first bar.
pub struct IndicatorTable {
    candles: Vec<Candle>,
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    rsi: Vec<f64>,
    atr: Vec<f64>,
    macd_histogram: Vec<f64>,
    adx: Vec<f64>,
}

impl IndicatorTable {
    /// Compute every enabled indicator over the candle sequence.
    /// Returns `None` when there are fewer than `cfg.min_bars()` candles.
    pub fn compute(candles: &[Candle], cfg: &RuleConfig) -> Option<Self> {
        if candles.len() < cfg.min_bars() {
            return None;
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        let macd_histogram = if cfg.macd_filter.enabled {
            macd(
                &closes,
                cfg.macd_filter.fast,
                cfg.macd_filter.slow,
                cfg.macd_filter.signal,
            )
            .histogram
        } else {
            vec![f64::NAN; closes.len()]
        };

        let adx_series = if cfg.adx_filter.enabled {
            adx(&highs, &lows, &closes, cfg.adx_filter.length)
        } else {
            vec![f64::NAN; closes.len()]
        };

        Some(Self {
            ema_fast: ema(&closes, cfg.ema_fast),
            ema_slow: ema(&closes, cfg.ema_slow),
            rsi: rsi(&closes, cfg.rsi_len),
            atr: atr(&highs, &lows, &closes, cfg.atr_len),
            macd_histogram,
            adx: adx_series,
            candles: candles.to_vec(),
        })
    }

    /// Snapshot of the decision bar (the last, closed bar).
    pub fn current(&self) -> BarSnapshot {
        self.snapshot(self.candles.len() - 1)
    }

    /// Snapshot of the bar before the decision bar.
    pub fn previous(&self) -> BarSnapshot {
        self.snapshot(self.candles.len() - 2)
    }

    fn snapshot(&self, idx: usize) -> BarSnapshot {
        BarSnapshot {
            candle: self.candles[idx],
            ema_fast: self.ema_fast[idx],
            ema_slow: self.ema_slow[idx],
            rsi: self.rsi[idx],
            atr: self.atr[idx],
            macd_histogram: self.macd_histogram[idx],
            adx: self.adx[idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 900, 0).unwrap(),
                open: close,
                high: close + 0.001,
                low: close - 0.001,
                close,
            })
            .collect()
    }

    #[test]
    fn compute_rejects_short_history() {
        let cfg = RuleConfig::default();
        let candles = candles_from_closes(&[1.0; 10]);
        assert!(IndicatorTable::compute(&candles, &cfg).is_none());
    }

    #[test]
    fn current_and_previous_are_adjacent_bars() {
        let cfg = RuleConfig::default();
        let closes: Vec<f64> = (0..40).map(|i| 1.0 + i as f64 * 0.001).collect();
        let candles = candles_from_closes(&closes);
        let table = IndicatorTable::compute(&candles, &cfg).unwrap();

        let cur = table.current();
        let prev = table.previous();
        assert_eq!(cur.candle, candles[39]);
        assert_eq!(prev.candle, candles[38]);
        assert!(cur.ema_fast.is_finite());
        assert!(prev.rsi.is_finite());
    }

    #[test]
    fn disabled_filters_read_nan() {
        let cfg = RuleConfig::default(); // macd/adx off
        let closes: Vec<f64> = (0..40).map(|i| 1.0 + i as f64 * 0.001).collect();
        let candles = candles_from_closes(&closes);
        let table = IndicatorTable::compute(&candles, &cfg).unwrap();
        assert!(table.current().macd_histogram.is_nan());
        assert!(table.current().adx.is_nan());
    }
}
