pub mod admin;
pub mod lookup;
pub mod participant;
pub mod workshop;
