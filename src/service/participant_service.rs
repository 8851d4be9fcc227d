use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::participant_dto::{EventStats, ParticipantPage, RsvpAction};
use crate::model::lookup::LookupKind;
use crate::model::participant::{
    NewParticipant, Participant, ParticipantProfile, RegistrationStatus, RsvpOutcome, EVENT_CAPACITY,
};
use crate::repository::lookup_repo::LookupRepository;
use crate::repository::participant_repo::ParticipantRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ParticipantService: Send + Sync {
    // Self service
    async fn complete_registration(
        &self,
        id: Uuid,
        email: &str,
        profile: ParticipantProfile,
    ) -> Result<Participant, ServiceError>;
    async fn get_profile(&self, id: Uuid) -> Result<Participant, ServiceError>;
    async fn update_profile(&self, id: Uuid, profile: ParticipantProfile) -> Result<Participant, ServiceError>;
    async fn delete_account(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn rsvp(&self, id: Uuid, action: RsvpAction) -> Result<Participant, ServiceError>;

    // Staff
    async fn list_participants(
        &self,
        status: Option<RegistrationStatus>,
        page: u32,
        limit: u32,
    ) -> Result<ParticipantPage, ServiceError>;
    async fn get_participant(&self, id: Uuid) -> Result<Participant, ServiceError>;
    async fn set_status(&self, id: Uuid, status: RegistrationStatus) -> Result<Participant, ServiceError>;
    async fn check_in(&self, id: Uuid) -> Result<Participant, ServiceError>;
    async fn event_stats(&self) -> Result<EventStats, ServiceError>;
}

pub struct ParticipantServiceImpl {
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub lookup_repo: Arc<dyn LookupRepository>,
    pub capacity: i64,
}

impl ParticipantServiceImpl {
    pub fn new(participant_repo: Arc<dyn ParticipantRepository>, lookup_repo: Arc<dyn LookupRepository>) -> Self {
        Self::with_capacity(participant_repo, lookup_repo, EVENT_CAPACITY)
    }

    pub fn with_capacity(
        participant_repo: Arc<dyn ParticipantRepository>,
        lookup_repo: Arc<dyn LookupRepository>,
        capacity: i64,
    ) -> Self {
        Self { participant_repo, lookup_repo, capacity }
    }

    async fn validate_lookups(&self, profile: &ParticipantProfile) -> Result<(), ServiceError> {
        let refs = [
            (LookupKind::University, profile.university_id),
            (LookupKind::Major, profile.major_id),
            (LookupKind::Gender, profile.gender_id),
            (LookupKind::Experience, profile.experience_id),
            (LookupKind::MarketingSource, profile.marketing_source_id),
        ];
        for (kind, id) in refs {
            let Some(id) = id else { continue };
            if !self.lookup_repo.exists(kind, id).await? {
                warn!(field = kind.field(), id, "Unknown lookup reference");
                return Err(ServiceError::InvalidInput(format!("Unknown {}: {}", kind.field(), id)));
            }
        }
        Ok(())
    }

    async fn confirm(&self, id: Uuid) -> Result<Participant, ServiceError> {
        match self.participant_repo.confirm_within_capacity(id, self.capacity).await? {
            RsvpOutcome::Confirmed(p) => {
                info!("Participant confirmed");
                Ok(p)
            }
            RsvpOutcome::AlreadyConfirmed(p) => Ok(p),
            RsvpOutcome::CapacityReached { confirmed } => Err(ServiceError::Conflict(format!(
                "Event is at capacity ({} of {} spots confirmed)",
                confirmed, self.capacity
            ))),
        }
    }
}

fn participant_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("No participant found for ID: {}", id))
}

#[async_trait]
impl ParticipantService for ParticipantServiceImpl {
    #[instrument(skip(self, profile))]
    async fn complete_registration(
        &self,
        id: Uuid,
        email: &str,
        profile: ParticipantProfile,
    ) -> Result<Participant, ServiceError> {
        info!("Completing registration");
        if self.participant_repo.find_by_id(id).await?.is_some() {
            return Err(ServiceError::Conflict("Registration already completed".to_string()));
        }
        self.validate_lookups(&profile).await?;

        let participant = NewParticipant { id, email: email.to_string(), profile };
        let inserted = self.participant_repo.insert(participant).await?;
        info!("Participant registered with status {}", inserted.status);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, id: Uuid) -> Result<Participant, ServiceError> {
        self.participant_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Registration not completed".to_string()))
    }

    #[instrument(skip(self, profile))]
    async fn update_profile(&self, id: Uuid, profile: ParticipantProfile) -> Result<Participant, ServiceError> {
        self.validate_lookups(&profile).await?;
        Ok(self.participant_repo.update_profile(id, profile).await?)
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: Uuid) -> Result<(), ServiceError> {
        info!("Deleting participant account");
        Ok(self.participant_repo.delete(id).await?)
    }

    #[instrument(skip(self))]
    async fn rsvp(&self, id: Uuid, action: RsvpAction) -> Result<Participant, ServiceError> {
        match action {
            RsvpAction::Confirm => self.confirm(id).await,
            RsvpAction::Decline => {
                info!("Participant declined");
                Ok(self.participant_repo.update_status(id, RegistrationStatus::Declined).await?)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_participants(
        &self,
        status: Option<RegistrationStatus>,
        page: u32,
        limit: u32,
    ) -> Result<ParticipantPage, ServiceError> {
        let page = page.max(1);
        let items = self.participant_repo.list(status, page, limit).await?;
        let total = self.participant_repo.count(status).await?;
        Ok(ParticipantPage { items, total, page, limit })
    }

    #[instrument(skip(self))]
    async fn get_participant(&self, id: Uuid) -> Result<Participant, ServiceError> {
        self.participant_repo.find_by_id(id).await?.ok_or_else(|| participant_not_found(id))
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn set_status(&self, id: Uuid, status: RegistrationStatus) -> Result<Participant, ServiceError> {
        info!("Setting participant status");
        match status {
            RegistrationStatus::Confirmed => self.confirm(id).await,
            other => Ok(self.participant_repo.update_status(id, other).await?),
        }
    }

    #[instrument(skip(self))]
    async fn check_in(&self, id: Uuid) -> Result<Participant, ServiceError> {
        let participant = self.get_participant(id).await?;
        if participant.status != RegistrationStatus::Confirmed {
            return Err(ServiceError::InvalidInput(format!(
                "Only confirmed participants can be checked in (status is {})",
                participant.status
            )));
        }
        if participant.checked_in {
            return Ok(participant);
        }
        info!("Checking participant in");
        // Status may have changed since the read above.
        self.participant_repo.check_in_confirmed(id).await?.ok_or_else(|| {
            ServiceError::InvalidInput("Only confirmed participants can be checked in".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn event_stats(&self) -> Result<EventStats, ServiceError> {
        let counts = self.participant_repo.counts().await?;
        Ok(EventStats::new(counts, self.capacity))
    }
}
