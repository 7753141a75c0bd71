pub mod identity_provider;
pub mod profile_store;
