use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::workshop_dto::WorkshopRequest;
use crate::middlewares::auth_middleware::AuthenticatedUser;
use crate::service::workshop_service::{WorkshopService, WorkshopServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiPath};

// Participant facing
pub async fn list_workshops_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshops = service.list_workshops(false).await?;
    Ok(Json(workshops))
}

pub async fn get_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshop = service.get_workshop(id, false).await?;
    Ok(Json(workshop))
}

pub async fn register_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let registration = service.register(user.id, id).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn unregister_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    service.unregister(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_workshops_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshops = service.my_workshops(user.id).await?;
    Ok(Json(workshops))
}

// Admin management
pub async fn admin_list_workshops_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshops = service.list_workshops(true).await?;
    Ok(Json(workshops))
}

pub async fn create_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    ApiJson(payload): ApiJson<WorkshopRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let workshop = service.create_workshop(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(workshop)))
}

pub async fn update_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<WorkshopRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let workshop = service.update_workshop(id, payload.into()).await?;
    Ok(Json(workshop))
}

pub async fn delete_workshop_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_workshop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn workshop_registrants_handler(
    State(service): State<Arc<WorkshopServiceImpl>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let registrants = service.registrants(id).await?;
    Ok(Json(registrants))
}
