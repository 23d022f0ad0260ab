use serde::{Deserialize, Serialize};

/// Top-level scanner config file (TOML).
///
/// Example `config/scanner.toml`:
/// ```toml
/// pairs = ["EURUSD", "GBPUSD", "USDJPY"]
/// interval = "15m"
/// range = "2d"
///
/// [rule]
/// ema_fast = 9
/// ema_slow = 21
/// rsi_len = 14
/// sl_atr_mult = 1.5
/// reward_mults = [2.0]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerFileConfig {
    /// Bare FX symbols, e.g. "EURUSD". Mapped to provider tickers downstream.
    pub pairs: Vec<String>,
    /// Candle bucket size in provider notation, e.g. "15m", "1h".
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Lookback window in provider notation, e.g. "2d".
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub rule: RuleConfig,
}

/// Signal rule parameters. Defaults mirror the classic 9/21 EMA cross with
/// RSI(14) confirmation and 1.5×ATR stops.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_len: usize,
    /// RSI must exceed this for a BUY.
    pub rsi_buy: f64,
    /// RSI must sit below this for a SELL.
    pub rsi_sell: f64,
    pub atr_len: usize,
    /// ATR at or below this floor means the market is too quiet to trade.
    pub atr_floor: f64,
    /// Stop distance in ATR multiples.
    pub sl_atr_mult: f64,
    /// Take-profit distances as multiples of the stop distance,
    /// nearest first. One to three staged targets.
    pub reward_mults: Vec<f64>,
    /// Maximum extension of price from the fast EMA, in ATR multiples.
    /// `None` disables the filter.
    pub max_ema_extension: Option<f64>,
    pub macd_filter: MacdFilter,
    pub adx_filter: AdxFilter,
}

/// Optional confirmation: MACD histogram rising for buys, falling for sells.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MacdFilter {
    pub enabled: bool,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Optional confirmation: ADX at or above a minimum trend strength.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdxFilter {
    pub enabled: bool,
    pub length: usize,
    pub min: f64,
}

fn default_interval() -> String {
    "15m".to_string()
}

fn default_range() -> String {
    "2d".to_string()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            rsi_len: 14,
            rsi_buy: 50.0,
            rsi_sell: 50.0,
            atr_len: 14,
            atr_floor: 0.0,
            sl_atr_mult: 1.5,
            reward_mults: vec![2.0],
            max_ema_extension: None,
            macd_filter: MacdFilter::default(),
            adx_filter: AdxFilter::default(),
        }
    }
}

impl Default for MacdFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Default for AdxFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            length: 14,
            min: 20.0,
        }
    }
}

impl ScannerFileConfig {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read scanner config at '{path}': {e}"));
        let cfg: Self = toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse scanner config at '{path}': {e}"));
        cfg.rule.validate();
        cfg
    }
}

impl RuleConfig {
    /// Panics on parameter combinations that can never produce a valid
    /// decision. Called once at startup, not per evaluation.
    pub fn validate(&self) {
        assert!(self.ema_fast >= 1 && self.ema_slow >= 1, "EMA lengths must be >= 1");
        assert!(
            self.ema_fast < self.ema_slow,
            "ema_fast must be less than ema_slow"
        );
        assert!(self.rsi_len >= 2, "rsi_len must be >= 2");
        assert!(self.atr_len >= 1, "atr_len must be >= 1");
        assert!(self.sl_atr_mult > 0.0, "sl_atr_mult must be positive");
        assert!(
            !self.reward_mults.is_empty() && self.reward_mults.len() <= 3,
            "reward_mults needs one to three entries"
        );
        assert!(
            self.reward_mults.iter().all(|m| *m > 0.0),
            "reward_mults must be positive"
        );
        if self.macd_filter.enabled {
            assert!(
                self.macd_filter.fast < self.macd_filter.slow,
                "macd_filter.fast must be less than macd_filter.slow"
            );
            assert!(self.macd_filter.signal >= 1, "macd_filter.signal must be >= 1");
        }
        if self.adx_filter.enabled {
            assert!(self.adx_filter.length >= 1, "adx_filter.length must be >= 1");
        }
    }

    /// Minimum candle count for a decision: enough for every enabled
    /// indicator to be defined at both the decision bar and the bar before
    /// it, plus one bar of margin.
    pub fn min_bars(&self) -> usize {
        let mut need = self
            .ema_slow
            .max(self.rsi_len + 1)
            .max(self.atr_len);
        if self.macd_filter.enabled {
            need = need.max(self.macd_filter.slow + self.macd_filter.signal - 1);
        }
        if self.adx_filter.enabled {
            need = need.max(2 * self.adx_filter.length);
        }
        need + 2
    }
}
