#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use hackathon_backend::app::app::AppServices;
use hackathon_backend::config::JwtConfig;
use hackathon_backend::model::admin::{Admin, AdminRole, AdminStatus};
use hackathon_backend::model::lookup::{LookupEntry, LookupKind};
use hackathon_backend::model::participant::{
    NewParticipant, Participant, ParticipantCounts, ParticipantProfile, RegistrationStatus, RsvpOutcome,
};
use hackathon_backend::model::workshop::{
    Registrant, RegisteredWorkshop, RegistrationOutcome, Workshop, WorkshopDeletion, WorkshopDraft,
    WorkshopRegistration, WorkshopUpdateOutcome, WorkshopWithCount,
};
use hackathon_backend::repository::admin_repo::AdminRepository;
use hackathon_backend::repository::lookup_repo::LookupRepository;
use hackathon_backend::repository::participant_repo::ParticipantRepository;
use hackathon_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use hackathon_backend::repository::workshop_repo::WorkshopRepository;
use hackathon_backend::service::admin_service::AdminServiceImpl;
use hackathon_backend::service::lookup_service::LookupServiceImpl;
use hackathon_backend::service::participant_service::ParticipantServiceImpl;
use hackathon_backend::service::workshop_service::WorkshopServiceImpl;
use hackathon_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

#[derive(Default)]
struct Tables {
    participants: HashMap<Uuid, Participant>,
    admins: Vec<Admin>,
    workshops: HashMap<Uuid, Workshop>,
    registrations: Vec<WorkshopRegistration>,
    lookups: HashMap<LookupKind, Vec<LookupEntry>>,
}

impl Tables {
    fn registered_count(&self, workshop_id: Uuid) -> i64 {
        self.registrations.iter().filter(|r| r.workshop_id == workshop_id).count() as i64
    }

    fn with_count(&self, workshop: &Workshop) -> WorkshopWithCount {
        WorkshopWithCount { workshop: workshop.clone(), registered_count: self.registered_count(workshop.id) }
    }
}

/// In-memory stand-in for every Postgres repository; one lock plays the role of the row locks.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        let mut tables = Tables::default();
        for kind in LookupKind::ALL {
            let entries = vec![
                LookupEntry { id: 1, name: format!("{} one", kind.table()) },
                LookupEntry { id: 2, name: format!("{} two", kind.table()) },
            ];
            tables.lookups.insert(kind, entries);
        }
        Arc::new(InMemoryStore { tables: Mutex::new(tables) })
    }

    pub fn confirmed_count(&self) -> i64 {
        let tables = self.tables.lock().unwrap();
        tables.participants.values().filter(|p| p.status == RegistrationStatus::Confirmed).count() as i64
    }

    pub fn set_status_unchecked(&self, id: Uuid, status: RegistrationStatus) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(p) = tables.participants.get_mut(&id) {
            p.status = status;
        }
    }
}

fn participant_missing(id: Uuid) -> RepositoryError {
    RepositoryError::not_found(format!("No participant found for ID: {}", id))
}

fn admin_missing(id: Uuid) -> RepositoryError {
    RepositoryError::not_found(format!("No admin found for ID: {}", id))
}

fn workshop_missing(id: Uuid) -> RepositoryError {
    RepositoryError::not_found(format!("Workshop not found for ID: {}", id))
}

#[async_trait]
impl ParticipantRepository for InMemoryStore {
    async fn insert(&self, participant: NewParticipant) -> RepositoryResult<Participant> {
        let mut tables = self.tables.lock().unwrap();
        let duplicate = tables.participants.contains_key(&participant.id)
            || tables.participants.values().any(|p| p.email == participant.email);
        if duplicate {
            return Err(RepositoryError::already_exists("Participant already exists"));
        }
        let now = Utc::now();
        let profile = participant.profile;
        let row = Participant {
            id: participant.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: participant.email,
            status: RegistrationStatus::Pending,
            checked_in: false,
            university_id: profile.university_id,
            major_id: profile.major_id,
            gender_id: profile.gender_id,
            experience_id: profile.experience_id,
            marketing_source_id: profile.marketing_source_id,
            resume_key: profile.resume_key,
            created_at: now,
            updated_at: now,
        };
        tables.participants.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Participant>> {
        Ok(self.tables.lock().unwrap().participants.get(&id).cloned())
    }

    async fn update_profile(&self, id: Uuid, profile: ParticipantProfile) -> RepositoryResult<Participant> {
        let mut tables = self.tables.lock().unwrap();
        let p = tables.participants.get_mut(&id).ok_or_else(|| participant_missing(id))?;
        p.first_name = profile.first_name;
        p.last_name = profile.last_name;
        p.university_id = profile.university_id;
        p.major_id = profile.major_id;
        p.gender_id = profile.gender_id;
        p.experience_id = profile.experience_id;
        p.marketing_source_id = profile.marketing_source_id;
        p.resume_key = profile.resume_key;
        p.updated_at = Utc::now();
        Ok(p.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.participants.remove(&id).is_none() {
            return Err(participant_missing(id));
        }
        tables.registrations.retain(|r| r.user_id != id);
        Ok(())
    }

    async fn list(
        &self,
        status: Option<RegistrationStatus>,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<Vec<Participant>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Participant> = tables
            .participants
            .values()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(rows.into_iter().skip(skip).take(limit as usize).collect())
    }

    async fn count(&self, status: Option<RegistrationStatus>) -> RepositoryResult<i64> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.participants.values().filter(|p| status.map_or(true, |s| p.status == s)).count() as i64)
    }

    async fn confirm_within_capacity(&self, id: Uuid, capacity: i64) -> RepositoryResult<RsvpOutcome> {
        let mut tables = self.tables.lock().unwrap();
        let confirmed = tables
            .participants
            .values()
            .filter(|p| p.status == RegistrationStatus::Confirmed)
            .count() as i64;
        let p = tables.participants.get_mut(&id).ok_or_else(|| participant_missing(id))?;
        if p.status == RegistrationStatus::Confirmed {
            return Ok(RsvpOutcome::AlreadyConfirmed(p.clone()));
        }
        if confirmed >= capacity {
            return Ok(RsvpOutcome::CapacityReached { confirmed });
        }
        p.status = RegistrationStatus::Confirmed;
        p.updated_at = Utc::now();
        Ok(RsvpOutcome::Confirmed(p.clone()))
    }

    async fn update_status(&self, id: Uuid, status: RegistrationStatus) -> RepositoryResult<Participant> {
        if status == RegistrationStatus::Confirmed {
            return Err(RepositoryError::validation("Confirmations must go through the RSVP capacity gate"));
        }
        let mut tables = self.tables.lock().unwrap();
        let p = tables.participants.get_mut(&id).ok_or_else(|| participant_missing(id))?;
        p.status = status;
        p.checked_in = false;
        Ok(p.clone())
    }

    async fn check_in_confirmed(&self, id: Uuid) -> RepositoryResult<Option<Participant>> {
        let mut tables = self.tables.lock().unwrap();
        match tables.participants.get_mut(&id) {
            Some(p) if p.status == RegistrationStatus::Confirmed => {
                p.checked_in = true;
                Ok(Some(p.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn counts(&self) -> RepositoryResult<ParticipantCounts> {
        let tables = self.tables.lock().unwrap();
        let mut counts = ParticipantCounts::default();
        for p in tables.participants.values() {
            match p.status {
                RegistrationStatus::Pending => counts.pending += 1,
                RegistrationStatus::Confirmed => counts.confirmed += 1,
                RegistrationStatus::Waitlisted => counts.waitlisted += 1,
                RegistrationStatus::Declined => counts.declined += 1,
            }
            if p.checked_in {
                counts.checked_in += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn insert(&self, email: &str, role: AdminRole) -> RepositoryResult<Admin> {
        let mut tables = self.tables.lock().unwrap();
        if tables.admins.iter().any(|a| a.email.eq_ignore_ascii_case(email)) {
            return Err(RepositoryError::already_exists("Admin already exists"));
        }
        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role,
            status: AdminStatus::Active,
            created_at: now,
            updated_at: now,
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Admin>> {
        Ok(self.tables.lock().unwrap().admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.admins.iter().find(|a| a.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<Admin>> {
        let mut admins = self.tables.lock().unwrap().admins.clone();
        admins.sort_by(|a, b| b.role.cmp(&a.role).then(a.email.cmp(&b.email)));
        Ok(admins)
    }

    async fn update_role(&self, id: Uuid, role: AdminRole) -> RepositoryResult<Admin> {
        let mut tables = self.tables.lock().unwrap();
        let admin = tables.admins.iter_mut().find(|a| a.id == id).ok_or_else(|| admin_missing(id))?;
        admin.role = role;
        Ok(admin.clone())
    }

    async fn update_status(&self, id: Uuid, status: AdminStatus) -> RepositoryResult<Admin> {
        let mut tables = self.tables.lock().unwrap();
        let admin = tables.admins.iter_mut().find(|a| a.id == id).ok_or_else(|| admin_missing(id))?;
        admin.status = status;
        Ok(admin.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.admins.len();
        tables.admins.retain(|a| a.id != id);
        if tables.admins.len() == before {
            return Err(admin_missing(id));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkshopRepository for InMemoryStore {
    async fn create(&self, draft: WorkshopDraft) -> RepositoryResult<Workshop> {
        let now = Utc::now();
        let workshop = Workshop {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            capacity: draft.capacity,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().workshops.insert(workshop.id, workshop.clone());
        Ok(workshop)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkshopWithCount>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.workshops.get(&id).map(|w| tables.with_count(w)))
    }

    async fn list(&self, include_inactive: bool) -> RepositoryResult<Vec<WorkshopWithCount>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<WorkshopWithCount> = tables
            .workshops
            .values()
            .filter(|w| include_inactive || w.is_active)
            .map(|w| tables.with_count(w))
            .collect();
        rows.sort_by(|a, b| {
            (a.workshop.date, a.workshop.start_time, &a.workshop.title)
                .cmp(&(b.workshop.date, b.workshop.start_time, &b.workshop.title))
        });
        Ok(rows)
    }

    async fn update(&self, id: Uuid, draft: WorkshopDraft) -> RepositoryResult<WorkshopUpdateOutcome> {
        let mut tables = self.tables.lock().unwrap();
        let registered = tables.registered_count(id);
        let workshop = tables.workshops.get_mut(&id).ok_or_else(|| workshop_missing(id))?;
        if i64::from(draft.capacity) < registered {
            return Ok(WorkshopUpdateOutcome::CapacityBelowRegistrations { registered });
        }
        workshop.title = draft.title;
        workshop.description = draft.description;
        workshop.date = draft.date;
        workshop.start_time = draft.start_time;
        workshop.end_time = draft.end_time;
        workshop.location = draft.location;
        workshop.capacity = draft.capacity;
        workshop.is_active = draft.is_active;
        workshop.updated_at = Utc::now();
        Ok(WorkshopUpdateOutcome::Updated(workshop.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<WorkshopDeletion> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.workshops.contains_key(&id) {
            return Err(workshop_missing(id));
        }
        let registered = tables.registered_count(id);
        if registered > 0 {
            return Ok(WorkshopDeletion::HasRegistrations(registered));
        }
        tables.workshops.remove(&id);
        Ok(WorkshopDeletion::Deleted)
    }

    async fn register(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<RegistrationOutcome> {
        let mut tables = self.tables.lock().unwrap();
        let workshop = tables.workshops.get(&workshop_id).ok_or_else(|| workshop_missing(workshop_id))?;
        let (capacity, is_active) = (workshop.capacity, workshop.is_active);
        if !is_active {
            return Ok(RegistrationOutcome::Inactive);
        }
        if tables.registrations.iter().any(|r| r.user_id == user_id && r.workshop_id == workshop_id) {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }
        if tables.registered_count(workshop_id) >= i64::from(capacity) {
            return Ok(RegistrationOutcome::Full { capacity });
        }
        let registration =
            WorkshopRegistration { id: Uuid::new_v4(), user_id, workshop_id, registered_at: Utc::now() };
        tables.registrations.push(registration.clone());
        Ok(RegistrationOutcome::Registered(registration))
    }

    async fn unregister(&self, user_id: Uuid, workshop_id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.registrations.len();
        tables.registrations.retain(|r| !(r.user_id == user_id && r.workshop_id == workshop_id));
        if tables.registrations.len() == before {
            return Err(RepositoryError::not_found("Not registered for this workshop"));
        }
        Ok(())
    }

    async fn registrations_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<RegisteredWorkshop>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                tables
                    .workshops
                    .get(&r.workshop_id)
                    .map(|w| RegisteredWorkshop { workshop: w.clone(), registered_at: r.registered_at })
            })
            .collect())
    }

    async fn registrants(&self, workshop_id: Uuid) -> RepositoryResult<Vec<Registrant>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.workshop_id == workshop_id)
            .filter_map(|r| {
                tables.participants.get(&r.user_id).map(|p| Registrant {
                    user_id: p.id,
                    first_name: p.first_name.clone(),
                    last_name: p.last_name.clone(),
                    email: p.email.clone(),
                    registered_at: r.registered_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl LookupRepository for InMemoryStore {
    async fn list(&self, kind: LookupKind) -> RepositoryResult<Vec<LookupEntry>> {
        Ok(self.tables.lock().unwrap().lookups.get(&kind).cloned().unwrap_or_default())
    }

    async fn exists(&self, kind: LookupKind, id: i32) -> RepositoryResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.lookups.get(&kind).map_or(false, |entries| entries.iter().any(|e| e.id == id)))
    }
}

// Fixtures

pub fn profile(first_name: &str) -> ParticipantProfile {
    ParticipantProfile {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        university_id: Some(1),
        major_id: Some(2),
        gender_id: None,
        experience_id: Some(1),
        marketing_source_id: None,
        resume_key: Some("resumes/test.pdf".to_string()),
    }
}

pub fn draft(title: &str, capacity: i32) -> WorkshopDraft {
    WorkshopDraft {
        title: title.to_string(),
        description: Some("Hands-on session".to_string()),
        date: NaiveDate::from_ymd_opt(2026, 11, 7).unwrap(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        location: "Room 101".to_string(),
        capacity,
        is_active: true,
    }
}

pub fn participant_service(store: &Arc<InMemoryStore>, capacity: i64) -> ParticipantServiceImpl {
    ParticipantServiceImpl::with_capacity(store.clone(), store.clone(), capacity)
}

pub fn workshop_service(store: &Arc<InMemoryStore>) -> WorkshopServiceImpl {
    WorkshopServiceImpl::new(store.clone(), store.clone())
}

pub fn admin_service(store: &Arc<InMemoryStore>) -> AdminServiceImpl {
    AdminServiceImpl::new(store.clone(), store.clone())
}

pub async fn seed_participant(store: &Arc<InMemoryStore>, email: &str) -> Participant {
    ParticipantRepository::insert(
        store.as_ref(),
        NewParticipant { id: Uuid::new_v4(), email: email.to_string(), profile: profile("Sam") },
    )
    .await
    .unwrap()
}

pub async fn seed_admin(store: &Arc<InMemoryStore>, email: &str, role: AdminRole) -> Admin {
    AdminRepository::insert(store.as_ref(), email, role).await.unwrap()
}

/// Router wired to the in-memory store, plus a way to mint session tokens for it.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
        let services = AppServices {
            jwt_utils: jwt_utils.clone(),
            participant_service: Arc::new(participant_service(&store, 150)),
            workshop_service: Arc::new(workshop_service(&store)),
            admin_service: Arc::new(admin_service(&store)),
            lookup_service: Arc::new(LookupServiceImpl::new(store.clone())),
        };
        let router = services.create_router();
        TestApp { store, jwt_utils, router }
    }

    pub fn token(&self, id: Uuid, email: &str) -> String {
        self.jwt_utils.issue_session_token(&id.to_string(), email).unwrap()
    }
}
