use crate::company::controller;
use crate::company::service::CompanyService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Routes for company registration
pub fn routes(company_service: Arc<CompanyService>) -> Router {
    Router::new()
        .route("/api/companies/register", post(controller::register))
        .route("/api/companies/options", get(controller::options))
        .with_state(company_service)
}
