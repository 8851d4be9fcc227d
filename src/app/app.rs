use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{AppConfig, BootstrapAdminConfig, JwtConfig, PostgresConfig};
use crate::middlewares::admin_middleware::StaffAuthState;
use crate::middlewares::auth_middleware::SessionAuthState;
use crate::model::admin::AdminRole;
use crate::repository::admin_repo::PgAdminRepository;
use crate::repository::lookup_repo::PgLookupRepository;
use crate::repository::participant_repo::PgParticipantRepository;
use crate::repository::workshop_repo::PgWorkshopRepository;
use crate::repository::{connect, run_migrations};
use crate::router::admin_router::admin_router;
use crate::router::lookup_router::lookup_router;
use crate::router::participant_router::participant_router;
use crate::router::workshop_router::workshop_router;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::service::lookup_service::LookupServiceImpl;
use crate::service::participant_service::ParticipantServiceImpl;
use crate::service::workshop_service::WorkshopServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

/// Everything the HTTP layer needs, independent of the storage backend.
#[derive(Clone)]
pub struct AppServices {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub participant_service: Arc<ParticipantServiceImpl>,
    pub workshop_service: Arc<WorkshopServiceImpl>,
    pub admin_service: Arc<AdminServiceImpl>,
    pub lookup_service: Arc<LookupServiceImpl>,
}

impl AppServices {
    pub fn create_router(&self) -> Router {
        let session_state = Arc::new(SessionAuthState { jwt_utils: self.jwt_utils.clone() });
        let staff_state = Arc::new(StaffAuthState::new(
            self.jwt_utils.clone(),
            self.admin_service.clone(),
            AdminRole::Volunteer,
        ));
        let admin_state = Arc::new(StaffAuthState::new(
            self.jwt_utils.clone(),
            self.admin_service.clone(),
            AdminRole::Admin,
        ));

        Router::new()
            .merge(lookup_router(self.lookup_service.clone()))
            .merge(participant_router(
                self.participant_service.clone(),
                session_state.clone(),
                staff_state.clone(),
                admin_state.clone(),
            ))
            .merge(workshop_router(self.workshop_service.clone(), session_state, admin_state.clone()))
            .merge(admin_router(self.admin_service.clone(), staff_state, admin_state))
            .route("/health", get(|| async { "OK" }))
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let postgres_config = PostgresConfig::from_env()?;

        let pool = connect(&postgres_config).await?;
        run_migrations(&pool).await?;

        let participant_repo = Arc::new(PgParticipantRepository::new(pool.clone()));
        let workshop_repo = Arc::new(PgWorkshopRepository::new(pool.clone()));
        let admin_repo = Arc::new(PgAdminRepository::new(pool.clone()));
        let lookup_repo = Arc::new(PgLookupRepository::new(pool));

        let services = AppServices {
            jwt_utils: Arc::new(JwtTokenUtilsImpl::new(jwt_config)),
            participant_service: Arc::new(ParticipantServiceImpl::new(
                participant_repo.clone(),
                lookup_repo.clone(),
            )),
            workshop_service: Arc::new(WorkshopServiceImpl::new(workshop_repo, participant_repo.clone())),
            admin_service: Arc::new(AdminServiceImpl::new(admin_repo, participant_repo)),
            lookup_service: Arc::new(LookupServiceImpl::new(lookup_repo)),
        };

        Self::create_bootstrap_admin(&services.admin_service).await;

        Ok(App { config, router: services.create_router() })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.config.bind_address().parse()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    async fn create_bootstrap_admin(admin_service: &AdminServiceImpl) {
        let Some(email) = BootstrapAdminConfig::from_env().email else {
            warn!("BOOTSTRAP_SUPER_ADMIN_EMAIL not set, skipping bootstrap admin");
            return;
        };
        match admin_service.ensure_bootstrap_super_admin(&email).await {
            Ok(Some(_)) => info!("Bootstrap super admin created."),
            Ok(None) => {}
            Err(e) => error!("Failed to create bootstrap super admin: {e}"),
        }
    }
}
