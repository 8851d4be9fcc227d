use axum::{extract::{Json, State}, response::IntoResponse};
use std::sync::Arc;

use crate::service::lookup_service::{LookupService, LookupServiceImpl};
use crate::util::error::HandlerError;

pub async fn lookups_handler(
    State(service): State<Arc<LookupServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let lookups = service.all_lookups().await?;
    Ok(Json(lookups))
}
