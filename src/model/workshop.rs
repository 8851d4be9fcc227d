use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workshop {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A workshop together with its current registration count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WorkshopWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub workshop: Workshop,
    pub registered_count: i64,
}

impl WorkshopWithCount {
    pub fn spots_remaining(&self) -> i64 {
        (i64::from(self.workshop.capacity) - self.registered_count).max(0)
    }
}

/// Admin-editable fields of a workshop.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub capacity: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkshopRegistration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workshop_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

/// A workshop the caller is registered for.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RegisteredWorkshop {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub workshop: Workshop,
    pub registered_at: DateTime<Utc>,
}

/// A participant registered for a workshop, as shown to admins.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Registrant {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(WorkshopRegistration),
    AlreadyRegistered,
    Full { capacity: i32 },
    Inactive,
}

#[derive(Debug, Clone)]
pub enum WorkshopUpdateOutcome {
    Updated(Workshop),
    CapacityBelowRegistrations { registered: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopDeletion {
    Deleted,
    HasRegistrations(i64),
}
