use axum::http::{header, HeaderMap};
use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::util::error::HandlerError;
use crate::util::jwt::{JwtError, JwtTokenUtils, JwtTokenUtilsImpl};

/// Identity carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

pub struct SessionAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Reads the session token from the Authorization header, falling back to the session cookie.
pub fn authenticate(jwt_utils: &JwtTokenUtilsImpl, headers: &HeaderMap) -> Result<AuthenticatedUser, HandlerError> {
    let bearer = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());

    let token = match (bearer, cookie) {
        (Some(auth_header), _) => jwt_utils.extract_token_from_header(auth_header),
        (None, Some(cookie_header)) => jwt_utils.extract_token_from_cookie(cookie_header),
        (None, None) => {
            debug!("Request carries no session token");
            return Err(HandlerError::unauthorized("Missing session token"));
        }
    }
    .map_err(|_| HandlerError::unauthorized("Malformed session token"))?;

    let claims = jwt_utils.validate_session_token(&token).map_err(|e| match e {
        JwtError::TokenExpired => HandlerError::unauthorized("Session has expired"),
        _ => HandlerError::unauthorized("Invalid session token"),
    })?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| HandlerError::unauthorized("Invalid session subject"))?;

    Ok(AuthenticatedUser { id, email: claims.email.trim().to_lowercase() })
}

pub async fn require_session(
    State(state): State<Arc<SessionAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let user = authenticate(&state.jwt_utils, req.headers())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
