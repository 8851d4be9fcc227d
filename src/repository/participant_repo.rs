use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::model::participant::{
    NewParticipant, Participant, ParticipantCounts, ParticipantProfile, RegistrationStatus,
    RsvpOutcome,
};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

const PARTICIPANT_COLUMNS: &str = r#"
    id, first_name, last_name, email, status, checked_in,
    university_id, major_id, gender_id, experience_id, marketing_source_id,
    resume_key, created_at, updated_at
"#;

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn insert(&self, participant: NewParticipant) -> RepositoryResult<Participant>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Participant>>;
    async fn update_profile(&self, id: Uuid, profile: ParticipantProfile) -> RepositoryResult<Participant>;
    /// Removes the participant and their workshop registrations.
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
    async fn list(
        &self,
        status: Option<RegistrationStatus>,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<Vec<Participant>>;
    async fn count(&self, status: Option<RegistrationStatus>) -> RepositoryResult<i64>;
    /// Confirms the participant only while fewer than `capacity` are confirmed.
    async fn confirm_within_capacity(&self, id: Uuid, capacity: i64) -> RepositoryResult<RsvpOutcome>;
    /// Sets any status except `Confirmed`, which must go through `confirm_within_capacity`.
    /// Leaving `Confirmed` also clears the check-in flag.
    async fn update_status(&self, id: Uuid, status: RegistrationStatus) -> RepositoryResult<Participant>;
    /// Marks a confirmed participant as checked in. `None` if the participant is not confirmed.
    async fn check_in_confirmed(&self, id: Uuid) -> RepositoryResult<Option<Participant>>;
    async fn counts(&self) -> RepositoryResult<ParticipantCounts>;
}

pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        PgParticipantRepository { pool }
    }
}

fn offset(page: u32, limit: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(limit)
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[tracing::instrument(skip(self, participant), fields(id = %participant.id))]
    async fn insert(&self, participant: NewParticipant) -> RepositoryResult<Participant> {
        info!("Inserting participant");
        let sql = format!(
            "INSERT INTO users (id, first_name, last_name, email, university_id, major_id, \
             gender_id, experience_id, marketing_source_id, resume_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            PARTICIPANT_COLUMNS
        );
        let profile = participant.profile;
        let inserted = sqlx::query_as::<_, Participant>(&sql)
            .bind(participant.id)
            .bind(profile.first_name)
            .bind(profile.last_name)
            .bind(participant.email)
            .bind(profile.university_id)
            .bind(profile.major_id)
            .bind(profile.gender_id)
            .bind(profile.experience_id)
            .bind(profile.marketing_source_id)
            .bind(profile.resume_key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert participant: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(inserted)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Participant>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", PARTICIPANT_COLUMNS);
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(participant)
    }

    #[tracing::instrument(skip(self, profile))]
    async fn update_profile(&self, id: Uuid, profile: ParticipantProfile) -> RepositoryResult<Participant> {
        let sql = format!(
            "UPDATE users SET first_name = $2, last_name = $3, university_id = $4, major_id = $5, \
             gender_id = $6, experience_id = $7, marketing_source_id = $8, resume_key = $9, \
             updated_at = now() WHERE id = $1 RETURNING {}",
            PARTICIPANT_COLUMNS
        );
        sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .bind(profile.first_name)
            .bind(profile.last_name)
            .bind(profile.university_id)
            .bind(profile.major_id)
            .bind(profile.gender_id)
            .bind(profile.experience_id)
            .bind(profile.marketing_source_id)
            .bind(profile.resume_key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No participant found for ID: {}", id)))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        info!("Deleting participant account");
        let mut tx = self.pool.begin().await?;

        let registrations = sqlx::query("DELETE FROM workshop_registrations WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        debug!(registrations, "Removed workshop registrations");

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::not_found(format!("No participant found for ID: {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        status: Option<RegistrationStatus>,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<Vec<Participant>> {
        let sql = format!(
            "SELECT {} FROM users \
             WHERE ($1::registration_status IS NULL OR status = $1) \
             ORDER BY created_at ASC, id ASC LIMIT $2 OFFSET $3",
            PARTICIPANT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Participant>(&sql)
            .bind(status)
            .bind(i64::from(limit))
            .bind(offset(page, limit))
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} participants", rows.len());
        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, status: Option<RegistrationStatus>) -> RepositoryResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE ($1::registration_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_within_capacity(&self, id: Uuid, capacity: i64) -> RepositoryResult<RsvpOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serializes every confirmation behind the single gate row.
        sqlx::query("SELECT id FROM rsvp_gate FOR UPDATE")
            .execute(&mut *tx)
            .await?;

        let sql = format!("SELECT {} FROM users WHERE id = $1 FOR UPDATE", PARTICIPANT_COLUMNS);
        let current = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No participant found for ID: {}", id)))?;

        if current.status == RegistrationStatus::Confirmed {
            tx.commit().await?;
            return Ok(RsvpOutcome::AlreadyConfirmed(current));
        }

        let confirmed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE status = 'confirmed'")
            .fetch_one(&mut *tx)
            .await?;

        if confirmed >= capacity {
            warn!(confirmed, capacity, "RSVP rejected, event is at capacity");
            tx.rollback().await?;
            return Ok(RsvpOutcome::CapacityReached { confirmed });
        }

        let sql = format!(
            "UPDATE users SET status = 'confirmed', updated_at = now() WHERE id = $1 RETURNING {}",
            PARTICIPANT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(confirmed = confirmed + 1, capacity, "Participant confirmed");
        Ok(RsvpOutcome::Confirmed(updated))
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: RegistrationStatus) -> RepositoryResult<Participant> {
        if status == RegistrationStatus::Confirmed {
            return Err(RepositoryError::validation(
                "Confirmations must go through the RSVP capacity gate",
            ));
        }
        let sql = format!(
            "UPDATE users SET status = $2, checked_in = false, updated_at = now() WHERE id = $1 RETURNING {}",
            PARTICIPANT_COLUMNS
        );
        sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No participant found for ID: {}", id)))
    }

    #[tracing::instrument(skip(self))]
    async fn check_in_confirmed(&self, id: Uuid) -> RepositoryResult<Option<Participant>> {
        let sql = format!(
            "UPDATE users SET checked_in = true, updated_at = now() \
             WHERE id = $1 AND status = 'confirmed' RETURNING {}",
            PARTICIPANT_COLUMNS
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if participant.is_none() {
            debug!("Check-in skipped, participant missing or not confirmed");
        }
        Ok(participant)
    }

    #[tracing::instrument(skip(self))]
    async fn counts(&self) -> RepositoryResult<ParticipantCounts> {
        let counts = sqlx::query_as::<_, ParticipantCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending')    AS pending,
                COUNT(*) FILTER (WHERE status = 'confirmed')  AS confirmed,
                COUNT(*) FILTER (WHERE status = 'waitlisted') AS waitlisted,
                COUNT(*) FILTER (WHERE status = 'declined')   AS declined,
                COUNT(*) FILTER (WHERE checked_in)            AS checked_in
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
