use thiserror::Error;

/// Errors reported by an identity provider while creating a credential
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityCreationError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Weak password (minimum {min_length} characters required)")]
    WeakPassword { min_length: usize },

    #[error("Identity provider unavailable")]
    ProviderUnavailable,

    #[error("Identity provider error: {0}")]
    Unknown(String),
}

impl IdentityCreationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "email_already_in_use",
            Self::WeakPassword { .. } => "weak_password",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::Unknown(_) => "provider_error",
        }
    }
}

/// Errors reported by a profile store while writing a profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileWriteError {
    #[error("Profile store unavailable")]
    Unavailable,

    #[error("Permission denied by profile store")]
    PermissionDenied,

    #[error("Profile store error: {0}")]
    Unknown(String),
}

impl ProfileWriteError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable => "store_unavailable",
            Self::PermissionDenied => "permission_denied",
            Self::Unknown(_) => "store_error",
        }
    }
}

/// Input field rejected by local validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    IdentityId,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::IdentityId => "id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("must not be empty")]
    Empty,

    #[error("is not a valid email address")]
    MalformedEmail,

    #[error("contains characters not allowed in a key")]
    ForbiddenCharacter,

    #[error("is longer than {max} bytes")]
    TooLong { max: usize },
}

/// Local input validation failure, raised before any collaborator is called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} {reason}", .field.as_str())]
pub struct ValidationError {
    pub field: Field,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: Field, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}
