use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use rules::ScannerFileConfig;
use scanner::{Scanner, YahooClient};
use telegram_alert::TelegramNotifier;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let scanner_cfg = ScannerFileConfig::load(&cfg.scanner_config_path);
    info!(
        pairs = ?scanner_cfg.pairs,
        interval = %scanner_cfg.interval,
        every_min = cfg.scan_every_min,
        "FxScan starting"
    );

    // ── External collaborators ────────────────────────────────────────────────
    let provider = Arc::new(YahooClient::new());
    let notifier = Arc::new(TelegramNotifier::new(
        cfg.telegram_token.clone(),
        cfg.telegram_chat_id,
    ));

    // ── Scanner ───────────────────────────────────────────────────────────────
    let scanner = Scanner::new(provider, notifier, &scanner_cfg);
    let status = scanner.status_handle();

    // ── Liveness endpoint ─────────────────────────────────────────────────────
    let api_state = api::AppState { status };

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    // The scanner's first tick fires immediately: startup scan, then one
    // per SCAN_EVERY_MIN.
    tokio::spawn(scanner.run(Duration::from_secs(cfg.scan_every_min * 60)));
    tokio::spawn(api::serve(api_state, cfg.port));

    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}
