//! API router assembly, in the teacher's `api::server` style: one
//! `Router::new()` wiring health and compiler routes onto shared `CoreApp`
//! state.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use super::routes::{filter, health};
use crate::core::CoreApp;

pub fn build_router(app: Arc<CoreApp>) -> Router {
    Router::new()
        .route("/healthz", get(health::health))
        .route(
            "/api/v1/collections/{collection_id}/products/{product}/filter",
            get(filter::compile_filter),
        )
        .with_state(app)
}
