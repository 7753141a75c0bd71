pub mod identities;
pub mod profiles;
