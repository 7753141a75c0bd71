pub mod registration_coordinator;
