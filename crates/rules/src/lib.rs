pub mod config;
pub mod rule;
pub mod series;

pub use config::{AdxFilter, MacdFilter, RuleConfig, ScannerFileConfig};
pub use rule::SignalRule;
pub use series::{BarSnapshot, IndicatorTable};
