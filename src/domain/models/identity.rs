use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::{Field, ValidationError, ValidationReason},
    models::profile::EmailAddress,
};

/// characters that cannot appear in a record key
const FORBIDDEN_KEY_CHARS: [char; 6] = ['/', '.', '#', '$', '[', ']'];

/// width of the `profiles.id` column
pub const MAX_IDENTITY_ID_LENGTH: usize = 255;

/// Value object for the opaque id a provider assigns to an identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(String);

impl IdentityId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new(Field::IdentityId, ValidationReason::Empty));
        }
        if value.len() > MAX_IDENTITY_ID_LENGTH {
            return Err(ValidationError::new(
                Field::IdentityId,
                ValidationReason::TooLong {
                    max: MAX_IDENTITY_ID_LENGTH,
                },
            ));
        }
        if value.contains(FORBIDDEN_KEY_CHARS) || value.chars().any(char::is_control) {
            return Err(ValidationError::new(
                Field::IdentityId,
                ValidationReason::ForbiddenCharacter,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated principal issued by an identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: IdentityId,
    email: EmailAddress,
}

impl Identity {
    pub fn new(id: IdentityId, email: EmailAddress) -> Self {
        Self { id, email }
    }

    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// What a provider hands back after a successful credential creation.
///
/// A provider may report success without a uid; the receipt keeps that
/// case representable so the caller can refuse to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialReceipt {
    uid: Option<String>,
}

impl CredentialReceipt {
    pub fn new(uid: Option<String>) -> Self {
        Self { uid }
    }

    /// Bind the receipt to the email it was issued for.
    /// Returns `None` when the provider gave no usable id.
    pub fn into_identity(self, email: EmailAddress) -> Option<Identity> {
        let id = IdentityId::new(self.uid?).ok()?;
        Some(Identity::new(id, email))
    }
}
