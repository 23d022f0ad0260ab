//! Pure, stateless transforms over ordered numeric sequences.
//!
//! Every function returns a series the same length as its input, aligned
//! 1:1 with the candle sequence. Warm-up indices (where the window has
//! insufficient history) hold `f64::NAN` and must never reach a decision;
//! the rule layer checks finiteness before acting on any value.
//!
//! All functions are deterministic given identical input and hold no state.

pub mod adx;
pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use adx::adx;
pub use atr::atr;
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;
