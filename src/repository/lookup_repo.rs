use async_trait::async_trait;
use sqlx::PgPool;

use crate::model::lookup::{LookupEntry, LookupKind};
use crate::repository::repository_error::RepositoryResult;

#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn list(&self, kind: LookupKind) -> RepositoryResult<Vec<LookupEntry>>;
    async fn exists(&self, kind: LookupKind, id: i32) -> RepositoryResult<bool>;
}

pub struct PgLookupRepository {
    pool: PgPool,
}

impl PgLookupRepository {
    pub fn new(pool: PgPool) -> Self {
        PgLookupRepository { pool }
    }
}

#[async_trait]
impl LookupRepository for PgLookupRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self, kind: LookupKind) -> RepositoryResult<Vec<LookupEntry>> {
        // Table names come from LookupKind, never from input.
        let sql = format!("SELECT id, name FROM {} ORDER BY name ASC", kind.table());
        Ok(sqlx::query_as::<_, LookupEntry>(&sql).fetch_all(&self.pool).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, kind: LookupKind, id: i32) -> RepositoryResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", kind.table());
        Ok(sqlx::query_scalar(&sql).bind(id).fetch_one(&self.pool).await?)
    }
}
