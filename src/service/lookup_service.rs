use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::model::lookup::{LookupKind, Lookups};
use crate::repository::lookup_repo::LookupRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait LookupService: Send + Sync {
    async fn all_lookups(&self) -> Result<Lookups, ServiceError>;
}

pub struct LookupServiceImpl {
    pub lookup_repo: Arc<dyn LookupRepository>,
}

impl LookupServiceImpl {
    pub fn new(lookup_repo: Arc<dyn LookupRepository>) -> Self {
        Self { lookup_repo }
    }
}

#[async_trait]
impl LookupService for LookupServiceImpl {
    #[instrument(skip(self))]
    async fn all_lookups(&self) -> Result<Lookups, ServiceError> {
        let mut lookups = Lookups::default();
        for kind in LookupKind::ALL {
            let entries = self.lookup_repo.list(kind).await?;
            match kind {
                LookupKind::University => lookups.universities = entries,
                LookupKind::Major => lookups.majors = entries,
                LookupKind::Gender => lookups.genders = entries,
                LookupKind::Experience => lookups.experience_levels = entries,
                LookupKind::MarketingSource => lookups.marketing_sources = entries,
            }
        }
        Ok(lookups)
    }
}
