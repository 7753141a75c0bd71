pub mod argon2_password_hasher;
pub mod db_error;
pub mod entity;
pub mod sea_orm_identity_provider;
pub mod sea_orm_profile_store;
