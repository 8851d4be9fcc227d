use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

/// Session claims issued by the auth provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (auth provider user ID)
    pub sub: String,
    /// Verified email of the session owner
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
    #[error("Missing JWT secret")]
    MissingSecret,
    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),
}

pub trait JwtTokenUtils {
    /// Mint a session token the way the auth provider does. Used by tooling and tests.
    fn issue_session_token(&self, user_id: &str, email: &str) -> Result<String, JwtError>;
    fn validate_session_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
    fn extract_token_from_cookie(&self, cookie_header: &str) -> Result<String, JwtError>;
    fn get_user_id_from_token(&self, token: &str) -> Result<Uuid, JwtError>;
}

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "access_token";

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    /// Create JWT utils from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_env().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    /// Create JWT utils from test environment variables
    pub fn from_test_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_test_env().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.jwt_config.leeway_secs;
        match &self.jwt_config.jwt_audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &self.jwt_config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn issue_session_token(&self, user_id: &str, email: &str) -> Result<String, JwtError> {
        debug!("Issuing session token for user: {}", user_id);

        let now = Utc::now();
        let expiration = now + Duration::minutes(self.jwt_config.session_expiration);
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            aud: self.jwt_config.jwt_audience.clone(),
            iss: self.jwt_config.jwt_issuer.clone(),
        };

        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }

    fn validate_session_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating session token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        match decode::<Claims>(token, &decoding_key, &self.validation()) {
            Ok(token_data) => {
                debug!("Token validation successful for user: {}", token_data.claims.sub);
                Ok(token_data.claims)
            }
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => {
                    warn!("Session token has expired");
                    Err(JwtError::TokenExpired)
                }
                _ => {
                    warn!("Failed to decode session token: {}", err);
                    Err(JwtError::DecodingFailed(err.to_string()))
                }
            },
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            debug!("Invalid authorization header format");
            return Err(JwtError::InvalidToken);
        };

        let token = token.trim();
        if token.is_empty() {
            debug!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }
        Ok(token.to_string())
    }

    fn extract_token_from_cookie(&self, cookie_header: &str) -> Result<String, JwtError> {
        cookie_header
            .split(';')
            .map(str::trim)
            .find_map(|c| c.strip_prefix(SESSION_COOKIE).and_then(|rest| rest.strip_prefix('=')))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(JwtError::InvalidToken)
    }

    fn get_user_id_from_token(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.validate_session_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidSubject(claims.sub))
    }
}
