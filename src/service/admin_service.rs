use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::model::admin::{Admin, AdminRole, AdminStatus};
use crate::repository::admin_repo::AdminRepository;
use crate::repository::participant_repo::ParticipantRepository;
use crate::service::role_policy;
use crate::util::error::ServiceError;

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Admin>, ServiceError>;
    async fn list_admins(&self) -> Result<Vec<Admin>, ServiceError>;
    async fn create_admin(&self, actor: &Admin, email: &str, role: AdminRole) -> Result<Admin, ServiceError>;
    async fn promote_participant(
        &self,
        actor: &Admin,
        participant_id: Uuid,
        role: AdminRole,
    ) -> Result<Admin, ServiceError>;
    async fn change_role(&self, actor: &Admin, target_id: Uuid, role: AdminRole) -> Result<Admin, ServiceError>;
    async fn set_status(&self, actor: &Admin, target_id: Uuid, status: AdminStatus) -> Result<Admin, ServiceError>;
    async fn remove_admin(&self, actor: &Admin, target_id: Uuid) -> Result<(), ServiceError>;
    /// Seeds a super admin for `email` unless an admin with that email exists.
    async fn ensure_bootstrap_super_admin(&self, email: &str) -> Result<Option<Admin>, ServiceError>;
}

pub struct AdminServiceImpl {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
}

impl AdminServiceImpl {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, participant_repo: Arc<dyn ParticipantRepository>) -> Self {
        Self { admin_repo, participant_repo }
    }

    async fn target(&self, id: Uuid) -> Result<Admin, ServiceError> {
        self.admin_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No admin found for ID: {}", id)))
    }

    async fn grant(&self, actor: &Admin, email: &str, role: AdminRole) -> Result<Admin, ServiceError> {
        role_policy::check_grant(actor, role)?;
        let email = email.trim().to_lowercase();
        if self.admin_repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(format!("{} is already an admin", email)));
        }
        let admin = self.admin_repo.insert(&email, role).await?;
        info!(id = %admin.id, role = %admin.role, granted_by = %actor.email, "Admin created");
        Ok(admin)
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    #[instrument(skip(self))]
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Admin>, ServiceError> {
        let admin = self.admin_repo.find_by_email(email).await?;
        Ok(admin.filter(Admin::is_active))
    }

    #[instrument(skip(self))]
    async fn list_admins(&self) -> Result<Vec<Admin>, ServiceError> {
        Ok(self.admin_repo.list().await?)
    }

    #[instrument(skip(self, actor), fields(actor = %actor.email, role = %role))]
    async fn create_admin(&self, actor: &Admin, email: &str, role: AdminRole) -> Result<Admin, ServiceError> {
        self.grant(actor, email, role).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.email, role = %role))]
    async fn promote_participant(
        &self,
        actor: &Admin,
        participant_id: Uuid,
        role: AdminRole,
    ) -> Result<Admin, ServiceError> {
        let participant = self
            .participant_repo
            .find_by_id(participant_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No participant found for ID: {}", participant_id)))?;
        self.grant(actor, &participant.email, role).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.email, role = %role))]
    async fn change_role(&self, actor: &Admin, target_id: Uuid, role: AdminRole) -> Result<Admin, ServiceError> {
        let target = self.target(target_id).await?;
        role_policy::check_role_change(actor, &target, role).map_err(|violation| {
            warn!(target_email = %target.email, "Role change refused: {}", violation);
            ServiceError::from(violation)
        })?;
        if target.role == role {
            return Ok(target);
        }
        let updated = self.admin_repo.update_role(target_id, role).await?;
        info!(target_email = %updated.email, from = %target.role, to = %updated.role, "Admin role changed");
        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(actor = %actor.email))]
    async fn set_status(&self, actor: &Admin, target_id: Uuid, status: AdminStatus) -> Result<Admin, ServiceError> {
        let target = self.target(target_id).await?;
        role_policy::check_target(actor, &target)?;
        let updated = self.admin_repo.update_status(target_id, status).await?;
        info!(target_email = %updated.email, ?status, "Admin status changed");
        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(actor = %actor.email))]
    async fn remove_admin(&self, actor: &Admin, target_id: Uuid) -> Result<(), ServiceError> {
        let target = self.target(target_id).await?;
        role_policy::check_target(actor, &target)?;
        self.admin_repo.delete(target_id).await?;
        info!(target_email = %target.email, "Admin privileges removed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn ensure_bootstrap_super_admin(&self, email: &str) -> Result<Option<Admin>, ServiceError> {
        let email = email.trim().to_lowercase();
        match self.admin_repo.find_by_email(&email).await {
            Ok(Some(_)) => {
                info!("Bootstrap super admin already exists, skipping creation.");
                Ok(None)
            }
            Ok(None) => {
                let admin = self.admin_repo.insert(&email, AdminRole::SuperAdmin).await?;
                info!(id = %admin.id, "Bootstrap super admin created");
                Ok(Some(admin))
            }
            Err(e) => {
                error!("Failed to check for existing bootstrap admin: {e}");
                Err(e.into())
            }
        }
    }
}
