use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use common::{Direction, Error, Evaluation, Notifier, QuoteProvider, Result, ScanStatus};
use rules::{ScannerFileConfig, SignalRule};

use crate::format::alert_text;
use crate::guard::AlertGuard;

/// Iterates the configured instruments each cycle: fetch candles, run the
/// rule, gate through the duplicate guard, deliver the alert.
///
/// Per-instrument failures are logged and skipped — partial-batch success
/// is the steady state, one bad fetch never stops the batch. Notifier
/// failures are logged and never retried; the guard still records the
/// decision so the alert is not re-sent next cycle.
pub struct Scanner {
    provider: Arc<dyn QuoteProvider>,
    notifier: Arc<dyn Notifier>,
    rule: SignalRule,
    guard: AlertGuard,
    pairs: Vec<String>,
    interval: String,
    range: String,
    status: Arc<RwLock<ScanStatus>>,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        notifier: Arc<dyn Notifier>,
        cfg: &ScannerFileConfig,
    ) -> Self {
        let status = Arc::new(RwLock::new(ScanStatus {
            pairs: cfg.pairs.clone(),
            ..ScanStatus::default()
        }));
        Self {
            provider,
            notifier,
            rule: SignalRule::new(cfg.rule.clone()),
            guard: AlertGuard::new(),
            pairs: cfg.pairs.clone(),
            interval: cfg.interval.clone(),
            range: cfg.range.clone(),
            status,
        }
    }

    /// Handle for the liveness endpoint.
    pub fn status_handle(&self) -> Arc<RwLock<ScanStatus>> {
        self.status.clone()
    }

    /// One pass over every configured instrument.
    pub async fn scan_once(&mut self) {
        let mut alerts = 0u64;
        let pairs = self.pairs.clone();
        for symbol in &pairs {
            match self.scan_pair(symbol).await {
                Ok(true) => alerts += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(symbol, error = %e, "Skipping pair this cycle");
                }
            }
        }

        let mut status = self.status.write().await;
        status.last_scan = Some(Utc::now());
        status.cycles_completed += 1;
        status.alerts_sent += alerts;
        info!(
            cycle = status.cycles_completed,
            alerts, "Scan cycle complete"
        );
    }

    /// Returns `Ok(true)` when an alert was emitted for this pair.
    async fn scan_pair(&mut self, symbol: &str) -> Result<bool> {
        let candles = self
            .provider
            .fetch_candles(symbol, &self.interval, &self.range)
            .await?;
        if candles.is_empty() {
            return Err(Error::Provider(format!("{symbol}: no data")));
        }
        let last_bar = candles
            .last()
            .map(|c| c.timestamp)
            .unwrap_or_else(Utc::now);

        match self.rule.evaluate(symbol, &candles) {
            Evaluation::Hold { reason } => {
                info!(symbol, %reason, "No signal");
                self.guard.should_emit(symbol, Direction::Hold, last_bar);
                Ok(false)
            }
            Evaluation::Signal(decision) => {
                if !self
                    .guard
                    .should_emit(symbol, decision.direction, decision.evaluated_at)
                {
                    info!(symbol, direction = %decision.direction, "Signal suppressed (duplicate)");
                    return Ok(false);
                }

                info!(
                    symbol,
                    direction = %decision.direction,
                    entry = decision.entry,
                    stop = decision.stop_loss,
                    "Signal emitted"
                );
                let text = alert_text(&decision, &self.interval);
                if let Err(e) = self.notifier.notify(&text).await {
                    // Fire-and-forget: log and move on, no retry.
                    warn!(symbol, error = %e, "Failed to deliver alert");
                }
                Ok(true)
            }
        }
    }

    /// Run forever: the first tick fires immediately (startup scan), then
    /// one scan per interval.
    pub async fn run(mut self, every: Duration) {
        info!(pairs = ?self.pairs, every = ?every, "Scanner running");
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            self.scan_once().await;
        }
    }
}
