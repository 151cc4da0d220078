use crate::dj::controller;
use crate::dj::service::DjService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Routes for DJ registration
pub fn routes(dj_service: Arc<DjService>) -> Router {
    Router::new()
        .route("/api/djs/register", post(controller::register))
        .route("/api/djs/options", get(controller::options))
        .with_state(dj_service)
}
