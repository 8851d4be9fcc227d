use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of participants that may hold a confirmed RSVP.
pub const EVENT_CAPACITY: i64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Waitlisted,
    Declined,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Waitlisted => "waitlisted",
            RegistrationStatus::Declined => "declined",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: RegistrationStatus,
    pub checked_in: bool,
    pub university_id: Option<i32>,
    pub major_id: Option<i32>,
    pub gender_id: Option<i32>,
    pub experience_id: Option<i32>,
    pub marketing_source_id: Option<i32>,
    pub resume_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-editable part of a participant record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantProfile {
    pub first_name: String,
    pub last_name: String,
    pub university_id: Option<i32>,
    pub major_id: Option<i32>,
    pub gender_id: Option<i32>,
    pub experience_id: Option<i32>,
    pub marketing_source_id: Option<i32>,
    pub resume_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub id: Uuid,
    pub email: String,
    pub profile: ParticipantProfile,
}

/// Result of passing a participant through the RSVP capacity gate.
#[derive(Debug, Clone)]
pub enum RsvpOutcome {
    Confirmed(Participant),
    AlreadyConfirmed(Participant),
    CapacityReached { confirmed: i64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ParticipantCounts {
    pub pending: i64,
    pub confirmed: i64,
    pub waitlisted: i64,
    pub declined: i64,
    pub checked_in: i64,
}

impl ParticipantCounts {
    pub fn total(&self) -> i64 {
        self.pending + self.confirmed + self.waitlisted + self.declined
    }
}
