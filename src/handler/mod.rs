pub mod admin_handler;
pub mod lookup_handler;
pub mod participant_handler;
pub mod workshop_handler;
