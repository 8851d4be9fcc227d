use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Settings for verifying session tokens issued by the auth provider
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret of the auth provider
    pub jwt_secret: String,
    /// Lifetime in minutes of tokens minted locally (tooling and tests)
    pub session_expiration: i64,
    /// Clock skew tolerated when checking `exp`, in seconds
    pub leeway_secs: u64,
    /// Expected `iss` claim (optional)
    pub jwt_issuer: Option<String>,
    /// Expected `aud` claim (optional)
    pub jwt_audience: Option<String>,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key used by the auth provider to sign sessions (required)
    /// - JWT_SESSION_EXPIRY: Locally minted token lifetime in minutes (defaults to 60)
    /// - JWT_LEEWAY_SECS: Expiry leeway in seconds (defaults to 30)
    /// - JWT_ISSUER: Expected issuer (optional)
    /// - JWT_AUDIENCE: Expected audience (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let session_expiration = env::var("JWT_SESSION_EXPIRY")
            .unwrap_or_else(|_| {
                warn!("JWT_SESSION_EXPIRY not set, using default: 60 minutes");
                "60".to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_SESSION_EXPIRY value: {}", e);
                ConfigError::InvalidValue(format!("JWT_SESSION_EXPIRY: {}", e))
            })?;

        let leeway_secs = env::var("JWT_LEEWAY_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| {
                error!("Invalid JWT_LEEWAY_SECS value: {}", e);
                ConfigError::InvalidValue(format!("JWT_LEEWAY_SECS: {}", e))
            })?;
        debug!("JWT leeway: {} seconds", leeway_secs);

        let jwt_issuer = env::var("JWT_ISSUER").ok();
        if let Some(ref issuer) = jwt_issuer {
            debug!("JWT issuer: {}", issuer);
        } else {
            debug!("No JWT issuer provided");
        }

        let jwt_audience = env::var("JWT_AUDIENCE").ok();
        if let Some(ref audience) = jwt_audience {
            debug!("JWT audience: {}", audience);
        } else {
            debug!("No JWT audience provided");
        }

        let config = JwtConfig {
            jwt_secret,
            session_expiration,
            leeway_secs,
            jwt_issuer,
            jwt_audience,
        };

        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating JWT configuration");

        if self.jwt_secret.is_empty() {
            error!("JWT secret cannot be empty");
            return Err(ConfigError::ValidationError("JWT secret cannot be empty".to_string()));
        }

        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.session_expiration <= 0 {
            error!("Session expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "Session expiration must be greater than 0".to_string(),
            ));
        }

        debug!("JWT configuration validation passed");
        Ok(())
    }

    /// Load JWT configuration from TEST_ prefixed environment variables
    pub fn from_test_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("TEST_JWT_SECRET")
            .map_err(|_| ConfigError::EnvVarNotFound("TEST_JWT_SECRET".to_string()))?;

        let config = JwtConfig {
            jwt_secret,
            session_expiration: 15,
            leeway_secs: 0,
            jwt_issuer: env::var("TEST_JWT_ISSUER").ok(),
            jwt_audience: env::var("TEST_JWT_AUDIENCE").ok(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Create JWT configuration for testing with default values
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes"
                .to_string(),
            session_expiration: 15,
            leeway_secs: 0,
            jwt_issuer: None,
            jwt_audience: None,
        }
    }
}
