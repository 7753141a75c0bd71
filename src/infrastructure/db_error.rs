use sea_orm::{DbErr, SqlErr};

use crate::domain::error::{IdentityCreationError, ProfileWriteError};

/// connection-level failures, as opposed to errors raised by a statement
fn is_unavailable(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

pub fn to_identity_error(err: DbErr) -> IdentityCreationError {
    let sql_err = err.sql_err();
    classify_identity_error(sql_err, err)
}

/// `sql_err` is sea-orm's reading of the driver error code; MySQL 1062
/// (duplicate entry on the unique `email` index) arrives as a unique violation
fn classify_identity_error(sql_err: Option<SqlErr>, err: DbErr) -> IdentityCreationError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => IdentityCreationError::EmailAlreadyInUse,
        _ if is_unavailable(&err) => IdentityCreationError::ProviderUnavailable,
        _ => IdentityCreationError::Unknown(err.to_string()),
    }
}

pub fn to_profile_error(err: DbErr) -> ProfileWriteError {
    if is_unavailable(&err) {
        ProfileWriteError::Unavailable
    } else {
        ProfileWriteError::Unknown(err.to_string())
    }
}
