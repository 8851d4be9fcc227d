use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::model::admin::{Admin, AdminRole, AdminStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

const ADMIN_COLUMNS: &str = "id, email, role, status, created_at, updated_at";

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn insert(&self, email: &str, role: AdminRole) -> RepositoryResult<Admin>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Admin>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>>;
    async fn list(&self) -> RepositoryResult<Vec<Admin>>;
    async fn update_role(&self, id: Uuid, role: AdminRole) -> RepositoryResult<Admin>;
    async fn update_status(&self, id: Uuid, status: AdminStatus) -> RepositoryResult<Admin>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        PgAdminRepository { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[tracing::instrument(skip(self), fields(role = %role))]
    async fn insert(&self, email: &str, role: AdminRole) -> RepositoryResult<Admin> {
        info!("Creating admin");
        let sql = format!(
            "INSERT INTO admins (id, email, role, status) VALUES ($1, $2, $3, 'active') RETURNING {}",
            ADMIN_COLUMNS
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to create admin: {}", e);
                RepositoryError::from(e)
            })
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Admin>> {
        let sql = format!("SELECT {} FROM admins WHERE id = $1", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        let sql = format!("SELECT {} FROM admins WHERE lower(email) = lower($1)", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Admin>> {
        let sql = format!("SELECT {} FROM admins ORDER BY role DESC, email ASC", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql).fetch_all(&self.pool).await?)
    }

    #[tracing::instrument(skip(self), fields(role = %role))]
    async fn update_role(&self, id: Uuid, role: AdminRole) -> RepositoryResult<Admin> {
        let sql = format!(
            "UPDATE admins SET role = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            ADMIN_COLUMNS
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No admin found for ID: {}", id)))
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: AdminStatus) -> RepositoryResult<Admin> {
        let sql = format!(
            "UPDATE admins SET status = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            ADMIN_COLUMNS
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No admin found for ID: {}", id)))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(format!("No admin found to delete for ID: {}", id)));
        }
        info!("Admin removed");
        Ok(())
    }
}
