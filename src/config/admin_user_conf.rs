use std::env;

use tracing::debug;

/// Email of the super admin seeded at startup, if any.
#[derive(Debug, Clone, Default)]
pub struct BootstrapAdminConfig {
    pub email: Option<String>,
}

impl BootstrapAdminConfig {
    pub fn from_env() -> Self {
        let email = env::var("BOOTSTRAP_SUPER_ADMIN_EMAIL")
            .ok()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        match &email {
            Some(e) => debug!("Bootstrap super admin email: {}", e),
            None => debug!("No bootstrap super admin configured"),
        }
        BootstrapAdminConfig { email }
    }
}
