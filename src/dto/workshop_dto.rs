use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::trimmed_string;
use crate::model::workshop::{WorkshopDraft, WorkshopWithCount};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkshopRequest {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(range(min = 1, max = 10000))]
    pub capacity: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<WorkshopRequest> for WorkshopDraft {
    fn from(req: WorkshopRequest) -> Self {
        WorkshopDraft {
            title: req.title,
            description: req.description,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            capacity: req.capacity,
            is_active: req.is_active,
        }
    }
}

/// Workshop as listed to callers, with live capacity figures.
#[derive(Debug, Clone, Serialize)]
pub struct WorkshopResponse {
    #[serde(flatten)]
    pub workshop: WorkshopWithCount,
    pub spots_remaining: i64,
}

impl From<WorkshopWithCount> for WorkshopResponse {
    fn from(workshop: WorkshopWithCount) -> Self {
        let spots_remaining = workshop.spots_remaining();
        WorkshopResponse { workshop, spots_remaining }
    }
}
