use common::{Candle, Direction, Evaluation, SignalDecision};
use tracing::debug;

use crate::config::RuleConfig;
use crate::series::{BarSnapshot, IndicatorTable};

/// Classifies the last closed bar as BUY, SELL or HOLD and derives
/// ATR-based protective levels.
///
/// Every filter reads the same bar index (plus its predecessor where a
/// delta is needed) through the aligned table — current and stale indices
/// are never mixed. Computation shortfalls (short history, warm-up NaN,
/// quiet market) resolve to `Hold`, never an error.
pub struct SignalRule {
    cfg: RuleConfig,
}

impl SignalRule {
    pub fn new(cfg: RuleConfig) -> Self {
        cfg.validate();
        Self { cfg }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.cfg
    }

    /// Evaluate one instrument's candle sequence (oldest first, last bar
    /// closed).
    pub fn evaluate(&self, symbol: &str, candles: &[Candle]) -> Evaluation {
        let table = match IndicatorTable::compute(candles, &self.cfg) {
            Some(t) => t,
            None => {
                return Evaluation::hold(format!(
                    "insufficient history: {} bars, need {}",
                    candles.len(),
                    self.cfg.min_bars()
                ))
            }
        };

        let cur = table.current();
        let prev = table.previous();

        let core = [
            cur.ema_fast,
            cur.ema_slow,
            cur.rsi,
            cur.atr,
            prev.ema_fast,
            prev.ema_slow,
            prev.rsi,
        ];
        if core.iter().any(|v| !v.is_finite()) {
            return Evaluation::hold("indicator warm-up incomplete at decision bar");
        }

        // Volatility floor: a zero or sub-floor ATR would produce a
        // degenerate stop, so the market is untradeable this bar.
        if cur.atr <= self.cfg.atr_floor {
            return Evaluation::hold(format!(
                "ATR {:.6} at or below floor {:.6}",
                cur.atr, self.cfg.atr_floor
            ));
        }

        if self.cfg.macd_filter.enabled
            && (!cur.macd_histogram.is_finite() || !prev.macd_histogram.is_finite())
        {
            return Evaluation::hold("MACD warm-up incomplete at decision bar");
        }
        if self.cfg.adx_filter.enabled && !cur.adx.is_finite() {
            return Evaluation::hold("ADX warm-up incomplete at decision bar");
        }

        let direction = self.classify(&cur, &prev);
        debug!(symbol, %direction, rsi = cur.rsi, atr = cur.atr, "Rule evaluated");

        match direction {
            Direction::Hold => Evaluation::hold(format!(
                "no clear setup: EMA{}/{} {:.6}/{:.6}, RSI={:.1}",
                self.cfg.ema_fast, self.cfg.ema_slow, cur.ema_fast, cur.ema_slow, cur.rsi
            )),
            dir => Evaluation::Signal(self.decision(symbol, &cur, dir)),
        }
    }

    fn classify(&self, cur: &BarSnapshot, prev: &BarSnapshot) -> Direction {
        let bullish = cur.ema_fast > cur.ema_slow
            && cur.rsi > self.cfg.rsi_buy
            && self.confirms(cur, prev, Direction::Buy);
        let bearish = cur.ema_fast < cur.ema_slow
            && cur.rsi < self.cfg.rsi_sell
            && self.confirms(cur, prev, Direction::Sell);

        match (bullish, bearish) {
            (true, false) => Direction::Buy,
            (false, true) => Direction::Sell,
            _ => Direction::Hold,
        }
    }

    /// Optional confirmation filters. All enabled filters must pass.
    fn confirms(&self, cur: &BarSnapshot, prev: &BarSnapshot, dir: Direction) -> bool {
        if self.cfg.macd_filter.enabled {
            let rising = cur.macd_histogram > prev.macd_histogram;
            let ok = match dir {
                Direction::Buy => rising,
                Direction::Sell => !rising,
                Direction::Hold => false,
            };
            if !ok {
                return false;
            }
        }

        if self.cfg.adx_filter.enabled && cur.adx < self.cfg.adx_filter.min {
            return false;
        }

        if let Some(max_ext) = self.cfg.max_ema_extension {
            if (cur.candle.close - cur.ema_fast).abs() > max_ext * cur.atr {
                return false;
            }
        }

        true
    }

    fn decision(&self, symbol: &str, cur: &BarSnapshot, direction: Direction) -> SignalDecision {
        let entry = cur.candle.close;
        let risk = self.cfg.sl_atr_mult * cur.atr;

        let (stop_loss, take_profits) = match direction {
            Direction::Buy => (
                entry - risk,
                self.cfg.reward_mults.iter().map(|m| entry + m * risk).collect(),
            ),
            Direction::Sell => (
                entry + risk,
                self.cfg.reward_mults.iter().map(|m| entry - m * risk).collect(),
            ),
            Direction::Hold => unreachable!("decision() is only called for Buy/Sell"),
        };

        let rationale = format!(
            "EMA({})={:.6}, EMA({})={:.6}, RSI({})={:.1}, ATR({})={:.6}",
            self.cfg.ema_fast,
            cur.ema_fast,
            self.cfg.ema_slow,
            cur.ema_slow,
            self.cfg.rsi_len,
            cur.rsi,
            self.cfg.atr_len,
            cur.atr,
        );

        SignalDecision {
            symbol: symbol.to_string(),
            direction,
            entry,
            stop_loss,
            take_profits,
            evaluated_at: cur.candle.timestamp,
            rationale,
        }
    }
}
