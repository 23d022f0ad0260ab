mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tracing::info;

use common::ScanStatus;

/// Shared state injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Scanner progress snapshot, updated after every cycle.
    pub status: Arc<RwLock<ScanStatus>>,
}

/// Build and run the liveness server. Exists only to keep the hosting
/// platform's health check happy.
pub async fn serve(state: AppState, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = Router::new()
        .merge(routes::liveness_router())
        .with_state(state);

    info!(%addr, "Liveness endpoint listening");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
