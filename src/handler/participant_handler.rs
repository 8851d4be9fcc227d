use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::participant_dto::{ParticipantListQuery, ProfileRequest, RsvpRequest, UpdateStatusRequest};
use crate::middlewares::auth_middleware::AuthenticatedUser;
use crate::service::participant_service::{ParticipantService, ParticipantServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiPath, ApiQuery};

// Complete registration
pub async fn complete_registration_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<ProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let participant = service.complete_registration(user.id, &user.email, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn get_my_profile_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let participant = service.get_profile(user.id).await?;
    Ok(Json(participant))
}

pub async fn update_my_profile_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<ProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let participant = service.update_profile(user.id, payload.into()).await?;
    Ok(Json(participant))
}

pub async fn delete_my_account_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_account(user.id).await?;
    info!(user_id = %user.id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

// RSVP
pub async fn rsvp_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<RsvpRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let participant = service.rsvp(user.id, payload.action).await?;
    Ok(Json(participant))
}

// Staff views
pub async fn list_participants_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    ApiQuery(query): ApiQuery<ParticipantListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    query.validate().map_err(HandlerError::validation)?;
    let page = service.list_participants(query.status, query.page(), query.limit()).await?;
    Ok(Json(page))
}

pub async fn get_participant_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let participant = service.get_participant(id).await?;
    Ok(Json(participant))
}

pub async fn check_in_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let participant = service.check_in(id).await?;
    Ok(Json(participant))
}

pub async fn event_stats_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.event_stats().await?;
    Ok(Json(stats))
}

pub async fn set_participant_status_handler(
    State(service): State<Arc<ParticipantServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let participant = service.set_status(id, payload.status).await?;
    Ok(Json(participant))
}
