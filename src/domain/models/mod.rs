pub mod credential;
pub mod identity;
pub mod profile;
pub mod registration;
