use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::trimmed_string;
use crate::model::participant::{Participant, ParticipantCounts, ParticipantProfile, RegistrationStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Body of registration completion and profile updates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(range(min = 1))]
    pub university_id: Option<i32>,
    #[validate(range(min = 1))]
    pub major_id: Option<i32>,
    #[validate(range(min = 1))]
    pub gender_id: Option<i32>,
    #[validate(range(min = 1))]
    pub experience_id: Option<i32>,
    #[validate(range(min = 1))]
    pub marketing_source_id: Option<i32>,
    /// Object store key of an already uploaded resume
    #[validate(length(min = 1, max = 512))]
    pub resume_key: Option<String>,
}

impl From<ProfileRequest> for ParticipantProfile {
    fn from(req: ProfileRequest) -> Self {
        ParticipantProfile {
            first_name: req.first_name,
            last_name: req.last_name,
            university_id: req.university_id,
            major_id: req.major_id,
            gender_id: req.gender_id,
            experience_id: req.experience_id,
            marketing_source_id: req.marketing_source_id,
            resume_key: req.resume_key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpAction {
    Confirm,
    Decline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RsvpRequest {
    pub action: RsvpAction,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ParticipantListQuery {
    pub status: Option<RegistrationStatus>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl ParticipantListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RegistrationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantPage {
    pub items: Vec<Participant>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventStats {
    #[serde(flatten)]
    pub counts: ParticipantCounts,
    pub total: i64,
    pub capacity: i64,
    pub remaining: i64,
}

impl EventStats {
    pub fn new(counts: ParticipantCounts, capacity: i64) -> Self {
        EventStats {
            counts,
            total: counts.total(),
            capacity,
            remaining: (capacity - counts.confirmed).max(0),
        }
    }
}
