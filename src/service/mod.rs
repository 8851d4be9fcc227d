pub mod admin_service;
pub mod lookup_service;
pub mod participant_service;
pub mod role_policy;
pub mod workshop_service;
