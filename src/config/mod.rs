pub mod admin_user_conf;
pub mod app_conf;
pub mod jwt_conf;
pub mod postgres_conf;

pub use admin_user_conf::BootstrapAdminConfig;
pub use app_conf::AppConfig;
pub use jwt_conf::JwtConfig;
pub use postgres_conf::PostgresConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
