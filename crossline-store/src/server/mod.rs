mod store_service;
mod ws_handler;

pub use store_service::StoreService;
pub use ws_handler::ws_handler;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

/// Route the store answers on; clients connect to `ws://host:port/store`.
pub const STORE_ROUTE: &str = "/store";

pub fn router(service: StoreService) -> Router {
    Router::new()
        .route(STORE_ROUTE, get(ws_handler))
        .with_state(service)
}

pub async fn serve(listener: TcpListener, service: StoreService) -> std::io::Result<()> {
    info!("Signaling store listening on {}", listener.local_addr()?);
    axum::serve(listener, router(service)).await
}
