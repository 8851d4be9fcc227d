use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::model::admin::{AdminRole, AdminStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(email)]
    pub email: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromoteParticipantRequest {
    pub participant_id: Uuid,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: AdminRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: AdminStatus,
}
