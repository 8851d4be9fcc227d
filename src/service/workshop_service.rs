use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::workshop_dto::WorkshopResponse;
use crate::model::workshop::{
    Registrant, RegisteredWorkshop, RegistrationOutcome, Workshop, WorkshopDeletion, WorkshopDraft,
    WorkshopRegistration, WorkshopUpdateOutcome,
};
use crate::repository::participant_repo::ParticipantRepository;
use crate::repository::workshop_repo::WorkshopRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait WorkshopService: Send + Sync {
    /// Inactive workshops are only listed when `include_inactive` is set.
    async fn list_workshops(&self, include_inactive: bool) -> Result<Vec<WorkshopResponse>, ServiceError>;
    async fn get_workshop(&self, id: Uuid, include_inactive: bool) -> Result<WorkshopResponse, ServiceError>;
    async fn create_workshop(&self, draft: WorkshopDraft) -> Result<Workshop, ServiceError>;
    async fn update_workshop(&self, id: Uuid, draft: WorkshopDraft) -> Result<Workshop, ServiceError>;
    async fn delete_workshop(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn register(&self, user_id: Uuid, workshop_id: Uuid) -> Result<WorkshopRegistration, ServiceError>;
    async fn unregister(&self, user_id: Uuid, workshop_id: Uuid) -> Result<(), ServiceError>;
    async fn my_workshops(&self, user_id: Uuid) -> Result<Vec<RegisteredWorkshop>, ServiceError>;
    async fn registrants(&self, workshop_id: Uuid) -> Result<Vec<Registrant>, ServiceError>;
}

pub struct WorkshopServiceImpl {
    pub workshop_repo: Arc<dyn WorkshopRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
}

impl WorkshopServiceImpl {
    pub fn new(workshop_repo: Arc<dyn WorkshopRepository>, participant_repo: Arc<dyn ParticipantRepository>) -> Self {
        Self { workshop_repo, participant_repo }
    }
}

fn workshop_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Workshop not found for ID: {}", id))
}

fn validate_schedule(draft: &WorkshopDraft) -> Result<(), ServiceError> {
    if draft.end_time <= draft.start_time {
        return Err(ServiceError::InvalidInput("Workshop end time must be after its start time".to_string()));
    }
    if draft.capacity <= 0 {
        return Err(ServiceError::InvalidInput("Workshop capacity must be positive".to_string()));
    }
    Ok(())
}

#[async_trait]
impl WorkshopService for WorkshopServiceImpl {
    #[instrument(skip(self))]
    async fn list_workshops(&self, include_inactive: bool) -> Result<Vec<WorkshopResponse>, ServiceError> {
        let workshops = self.workshop_repo.list(include_inactive).await?;
        Ok(workshops.into_iter().map(WorkshopResponse::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_workshop(&self, id: Uuid, include_inactive: bool) -> Result<WorkshopResponse, ServiceError> {
        let workshop = self
            .workshop_repo
            .find_by_id(id)
            .await?
            .filter(|w| include_inactive || w.workshop.is_active)
            .ok_or_else(|| workshop_not_found(id))?;
        Ok(WorkshopResponse::from(workshop))
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_workshop(&self, draft: WorkshopDraft) -> Result<Workshop, ServiceError> {
        validate_schedule(&draft)?;
        let workshop = self.workshop_repo.create(draft).await?;
        info!(id = %workshop.id, "Workshop created");
        Ok(workshop)
    }

    #[instrument(skip(self, draft))]
    async fn update_workshop(&self, id: Uuid, draft: WorkshopDraft) -> Result<Workshop, ServiceError> {
        validate_schedule(&draft)?;
        match self.workshop_repo.update(id, draft).await? {
            WorkshopUpdateOutcome::Updated(workshop) => {
                info!("Workshop updated");
                Ok(workshop)
            }
            WorkshopUpdateOutcome::CapacityBelowRegistrations { registered } => {
                Err(ServiceError::Conflict(format!(
                    "Capacity cannot be lower than the {} existing registrations",
                    registered
                )))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_workshop(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.workshop_repo.delete(id).await? {
            WorkshopDeletion::Deleted => Ok(()),
            WorkshopDeletion::HasRegistrations(count) => Err(ServiceError::Conflict(format!(
                "Workshop has {} registrations and cannot be deleted",
                count
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn register(&self, user_id: Uuid, workshop_id: Uuid) -> Result<WorkshopRegistration, ServiceError> {
        if self.participant_repo.find_by_id(user_id).await?.is_none() {
            warn!("Workshop registration attempted before completing event registration");
            return Err(ServiceError::Forbidden(
                "Complete your event registration before joining workshops".to_string(),
            ));
        }

        match self.workshop_repo.register(user_id, workshop_id).await? {
            RegistrationOutcome::Registered(registration) => {
                info!("Registered for workshop");
                Ok(registration)
            }
            RegistrationOutcome::AlreadyRegistered => {
                Err(ServiceError::Conflict("Already registered for this workshop".to_string()))
            }
            RegistrationOutcome::Full { capacity } => {
                Err(ServiceError::Conflict(format!("Workshop is full ({} spots)", capacity)))
            }
            RegistrationOutcome::Inactive => Err(workshop_not_found(workshop_id)),
        }
    }

    #[instrument(skip(self))]
    async fn unregister(&self, user_id: Uuid, workshop_id: Uuid) -> Result<(), ServiceError> {
        self.workshop_repo.unregister(user_id, workshop_id).await?;
        info!("Unregistered from workshop");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn my_workshops(&self, user_id: Uuid) -> Result<Vec<RegisteredWorkshop>, ServiceError> {
        Ok(self.workshop_repo.registrations_for_user(user_id).await?)
    }

    #[instrument(skip(self))]
    async fn registrants(&self, workshop_id: Uuid) -> Result<Vec<Registrant>, ServiceError> {
        if self.workshop_repo.find_by_id(workshop_id).await?.is_none() {
            return Err(workshop_not_found(workshop_id));
        }
        Ok(self.workshop_repo.registrants(workshop_id).await?)
    }
}
