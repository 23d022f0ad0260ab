use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC bar for a fixed time bucket of one instrument.
///
/// Candle sequences are ordered ascending by timestamp with no duplicate
/// timestamps. The provider layer guarantees the last candle of a fetched
/// sequence is a *closed* bar, never a still-forming one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Directional call produced by the signal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
            Direction::Hold => write!(f, "HOLD"),
        }
    }
}

/// A directional trade recommendation with protective levels.
///
/// All fields derive deterministically from the last closed bar and the
/// aligned indicator values at that index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub symbol: String,
    pub direction: Direction,
    pub entry: f64,
    pub stop_loss: f64,
    /// Staged targets, nearest first. At least one, at most three.
    pub take_profits: Vec<f64>,
    /// Timestamp of the decision bar, not wall-clock time.
    pub evaluated_at: DateTime<Utc>,
    /// Indicator readings that produced the call, for the alert text.
    pub rationale: String,
}

/// Outcome of one rule evaluation.
///
/// "No signal" is the expected, common case and is never an `Err` — fetch
/// failures are the only error path out of a scan step.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Signal(SignalDecision),
    Hold { reason: String },
}

impl Evaluation {
    pub fn hold(reason: impl Into<String>) -> Self {
        Evaluation::Hold {
            reason: reason.into(),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Evaluation::Signal(d) => d.direction,
            Evaluation::Hold { .. } => Direction::Hold,
        }
    }
}

/// Shared snapshot of scanner progress, exposed by the liveness endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStatus {
    pub pairs: Vec<String>,
    pub last_scan: Option<DateTime<Utc>>,
    pub cycles_completed: u64,
    pub alerts_sent: u64,
}
