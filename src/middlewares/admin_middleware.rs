use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

use crate::middlewares::auth_middleware::authenticate;
use crate::model::admin::{Admin, AdminRole};
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::JwtTokenUtilsImpl;

/// The active admin row behind the current request.
#[derive(Debug, Clone)]
pub struct StaffContext(pub Admin);

pub struct StaffAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub admin_service: Arc<AdminServiceImpl>,
    pub min_role: AdminRole,
}

impl StaffAuthState {
    pub fn new(jwt_utils: Arc<JwtTokenUtilsImpl>, admin_service: Arc<AdminServiceImpl>, min_role: AdminRole) -> Self {
        StaffAuthState { jwt_utils, admin_service, min_role }
    }
}

pub async fn require_staff(
    State(state): State<Arc<StaffAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let user = authenticate(&state.jwt_utils, req.headers())?;

    let admin = state
        .admin_service
        .find_active_by_email(&user.email)
        .await?
        .ok_or_else(|| HandlerError::forbidden("Staff access required"))?;

    if !admin.has_at_least(state.min_role) {
        warn!(email = %admin.email, role = %admin.role, required = %state.min_role, "Staff tier too low");
        return Err(HandlerError::forbidden(format!("Requires role {} or higher", state.min_role)));
    }

    req.extensions_mut().insert(user);
    req.extensions_mut().insert(StaffContext(admin));
    Ok(next.run(req).await)
}
