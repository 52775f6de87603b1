use std::sync::Arc;

use anyhow::Result;
use tom_catalog_http::{AppState, create_router};
use tom_catalog_service::TargetService;

pub(crate) async fn run(service: TargetService, port: u16, host: &str) -> Result<()> {
    tracing::info!(manager = service.matcher().kind(), "Duplicate matching configured");
    let state = Arc::new(AppState { target_service: Arc::new(service) });
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
