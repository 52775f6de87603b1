//! HTTP API server for tom-catalog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use tom_catalog_service::TargetService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Validating target service; owns the match manager chosen at start-up
    pub target_service: Arc<TargetService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/stats", get(handlers::matching::get_stats))
        .route(
            "/api/targets",
            get(handlers::targets::list_targets).post(handlers::targets::create_target),
        )
        .route(
            "/api/targets/{id}",
            get(handlers::targets::get_target)
                .put(handlers::targets::update_target)
                .delete(handlers::targets::delete_target),
        )
        .route("/api/targets/{id}/aliases", post(handlers::targets::add_alias))
        .route("/api/aliases/{id}", delete(handlers::targets::delete_alias))
        .route("/api/match", get(handlers::matching::match_name))
        .route("/api/cone-search", get(handlers::matching::cone_search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        match_manager: state.target_service.matcher().kind().to_owned(),
    })
}

#[cfg(test)]
mod tests;
