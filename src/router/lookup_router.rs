use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::lookup_handler::lookups_handler;
use crate::service::lookup_service::LookupServiceImpl;

/// Public reference data for the registration form.
pub fn lookup_router(service: Arc<LookupServiceImpl>) -> Router {
    Router::new().route("/lookups", get(lookups_handler)).with_state(service)
}
