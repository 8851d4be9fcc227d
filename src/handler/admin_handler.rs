use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::admin_dto::{ChangeRoleRequest, ChangeStatusRequest, CreateAdminRequest, PromoteParticipantRequest};
use crate::middlewares::admin_middleware::StaffContext;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiPath};

/// The staff member making the request.
pub async fn admin_me_handler(Extension(StaffContext(admin)): Extension<StaffContext>) -> impl IntoResponse {
    Json(admin)
}

pub async fn list_admins_handler(
    State(service): State<Arc<AdminServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let admins = service.list_admins().await?;
    Ok(Json(admins))
}

pub async fn create_admin_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(StaffContext(actor)): Extension<StaffContext>,
    ApiJson(payload): ApiJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let admin = service.create_admin(&actor, &payload.email, payload.role).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn promote_participant_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(StaffContext(actor)): Extension<StaffContext>,
    ApiJson(payload): ApiJson<PromoteParticipantRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let admin = service.promote_participant(&actor, payload.participant_id, payload.role).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn change_role_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(StaffContext(actor)): Extension<StaffContext>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ChangeRoleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let admin = service.change_role(&actor, id, payload.role).await?;
    Ok(Json(admin))
}

pub async fn change_status_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(StaffContext(actor)): Extension<StaffContext>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ChangeStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let admin = service.set_status(&actor, id, payload.status).await?;
    Ok(Json(admin))
}

pub async fn remove_admin_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(StaffContext(actor)): Extension<StaffContext>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    service.remove_admin(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
