use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::model::workshop::{
    Registrant, RegisteredWorkshop, RegistrationOutcome, Workshop, WorkshopDeletion, WorkshopDraft,
    WorkshopRegistration, WorkshopUpdateOutcome, WorkshopWithCount,
};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

const WORKSHOP_COLUMNS: &str =
    "id, title, description, date, start_time, end_time, location, capacity, is_active, created_at, updated_at";

const WORKSHOP_COLUMNS_W: &str = "w.id, w.title, w.description, w.date, w.start_time, w.end_time, \
     w.location, w.capacity, w.is_active, w.created_at, w.updated_at";

#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    async fn create(&self, draft: WorkshopDraft) -> RepositoryResult<Workshop>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkshopWithCount>>;
    async fn list(&self, include_inactive: bool) -> RepositoryResult<Vec<WorkshopWithCount>>;
    async fn update(&self, id: Uuid, draft: WorkshopDraft) -> RepositoryResult<WorkshopUpdateOutcome>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<WorkshopDeletion>;
    /// Inserts the registration only while the workshop has a free spot.
    async fn register(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<RegistrationOutcome>;
    async fn unregister(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<()>;
    async fn registrations_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<RegisteredWorkshop>>;
    async fn registrants(&self, workshop_id: Uuid) -> RepositoryResult<Vec<Registrant>>;
}

pub struct PgWorkshopRepository {
    pool: PgPool,
}

impl PgWorkshopRepository {
    pub fn new(pool: PgPool) -> Self {
        PgWorkshopRepository { pool }
    }
}

fn not_found(id: Uuid) -> RepositoryError {
    RepositoryError::not_found(format!("Workshop not found for ID: {}", id))
}

#[async_trait]
impl WorkshopRepository for PgWorkshopRepository {
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: WorkshopDraft) -> RepositoryResult<Workshop> {
        info!("Creating workshop");
        let sql = format!(
            "INSERT INTO workshops (id, title, description, date, start_time, end_time, location, capacity, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            WORKSHOP_COLUMNS
        );
        Ok(sqlx::query_as::<_, Workshop>(&sql)
            .bind(Uuid::new_v4())
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.date)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.location)
            .bind(draft.capacity)
            .bind(draft.is_active)
            .fetch_one(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkshopWithCount>> {
        let sql = format!(
            "SELECT {}, COUNT(r.id) AS registered_count \
             FROM workshops w LEFT JOIN workshop_registrations r ON r.workshop_id = w.id \
             WHERE w.id = $1 GROUP BY w.id",
            WORKSHOP_COLUMNS_W
        );
        Ok(sqlx::query_as::<_, WorkshopWithCount>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, include_inactive: bool) -> RepositoryResult<Vec<WorkshopWithCount>> {
        let sql = format!(
            "SELECT {}, COUNT(r.id) AS registered_count \
             FROM workshops w LEFT JOIN workshop_registrations r ON r.workshop_id = w.id \
             WHERE ($1 OR w.is_active) GROUP BY w.id \
             ORDER BY w.date ASC, w.start_time ASC, w.title ASC",
            WORKSHOP_COLUMNS_W
        );
        Ok(sqlx::query_as::<_, WorkshopWithCount>(&sql)
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update(&self, id: Uuid, draft: WorkshopDraft) -> RepositoryResult<WorkshopUpdateOutcome> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM workshops WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found(id))?;

        let registered: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workshop_registrations WHERE workshop_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if i64::from(draft.capacity) < registered {
            tx.rollback().await?;
            return Ok(WorkshopUpdateOutcome::CapacityBelowRegistrations { registered });
        }

        let sql = format!(
            "UPDATE workshops SET title = $2, description = $3, date = $4, start_time = $5, end_time = $6, \
             location = $7, capacity = $8, is_active = $9, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            WORKSHOP_COLUMNS
        );
        let workshop = sqlx::query_as::<_, Workshop>(&sql)
            .bind(id)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.date)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.location)
            .bind(draft.capacity)
            .bind(draft.is_active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(WorkshopUpdateOutcome::Updated(workshop))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<WorkshopDeletion> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM workshops WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found(id))?;

        let registered: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workshop_registrations WHERE workshop_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if registered > 0 {
            warn!(registered, "Refusing to delete workshop with registrations");
            tx.rollback().await?;
            return Ok(WorkshopDeletion::HasRegistrations(registered));
        }

        sqlx::query("DELETE FROM workshops WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        info!("Workshop deleted");
        Ok(WorkshopDeletion::Deleted)
    }

    #[tracing::instrument(skip(self))]
    async fn register(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<RegistrationOutcome> {
        let mut tx = self.pool.begin().await?;

        let (capacity, is_active): (i32, bool) =
            sqlx::query_as("SELECT capacity, is_active FROM workshops WHERE id = $1 FOR UPDATE")
                .bind(workshop_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found(workshop_id))?;

        if !is_active {
            tx.rollback().await?;
            return Ok(RegistrationOutcome::Inactive);
        }

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM workshop_registrations WHERE user_id = $1 AND workshop_id = $2)",
        )
        .bind(user_id)
        .bind(workshop_id)
        .fetch_one(&mut *tx)
        .await?;
        if already {
            tx.rollback().await?;
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let registered: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workshop_registrations WHERE workshop_id = $1")
                .bind(workshop_id)
                .fetch_one(&mut *tx)
                .await?;
        if registered >= i64::from(capacity) {
            tx.rollback().await?;
            return Ok(RegistrationOutcome::Full { capacity });
        }

        let registration = sqlx::query_as::<_, WorkshopRegistration>(
            "INSERT INTO workshop_registrations (id, user_id, workshop_id) VALUES ($1, $2, $3) \
             RETURNING id, user_id, workshop_id, registered_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(workshop_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(registered = registered + 1, capacity, "Workshop registration created");
        Ok(RegistrationOutcome::Registered(registration))
    }

    #[tracing::instrument(skip(self))]
    async fn unregister(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<()> {
        let result =
            sqlx::query("DELETE FROM workshop_registrations WHERE user_id = $1 AND workshop_id = $2")
                .bind(user_id)
                .bind(workshop_id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Not registered for this workshop"));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn registrations_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<RegisteredWorkshop>> {
        let sql = format!(
            "SELECT {}, r.registered_at FROM workshop_registrations r \
             JOIN workshops w ON w.id = r.workshop_id \
             WHERE r.user_id = $1 ORDER BY w.date ASC, w.start_time ASC",
            WORKSHOP_COLUMNS_W
        );
        Ok(sqlx::query_as::<_, RegisteredWorkshop>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn registrants(&self, workshop_id: Uuid) -> RepositoryResult<Vec<Registrant>> {
        Ok(sqlx::query_as::<_, Registrant>(
            "SELECT u.id AS user_id, u.first_name, u.last_name, u.email, r.registered_at \
             FROM workshop_registrations r JOIN users u ON u.id = r.user_id \
             WHERE r.workshop_id = $1 ORDER BY r.registered_at ASC",
        )
        .bind(workshop_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
