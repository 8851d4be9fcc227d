pub mod admin_router;
pub mod lookup_router;
pub mod participant_router;
pub mod workshop_router;
