use thiserror::Error;

use crate::domain::{
    error::{IdentityCreationError, ProfileWriteError, ValidationError},
    models::identity::IdentityId,
};

/// Which step of a registration failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    IdentityCreation,
    ProfileWrite,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityCreation => "identity_creation",
            Self::ProfileWrite => "profile_write",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCause {
    #[error(transparent)]
    Identity(#[from] IdentityCreationError),

    #[error(transparent)]
    Profile(#[from] ProfileWriteError),

    /// provider reported success but handed back no usable id
    #[error("Identity provider reported success without a usable identity id")]
    InvariantViolation,
}

impl FailureCause {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Identity(err) => err.code(),
            Self::Profile(err) => err.code(),
            Self::InvariantViolation => "invariant_violation",
        }
    }
}

/// Terminal state reached by a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Invalid,
    FailedNoIdentity,
    FailedOrphanIdentity,
    Complete,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::FailedNoIdentity => "failed_no_identity",
            Self::FailedOrphanIdentity => "failed_orphan_identity",
            Self::Complete => "complete",
        }
    }
}

/// What the caller should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryAction {
    None,
    CorrectInput,
    RetryRegister,
    CompleteProfile(IdentityId),
    Escalate,
}

impl RecoveryAction {
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CorrectInput => "correct_input",
            Self::RetryRegister => "retry_register",
            Self::CompleteProfile(_) => "complete_profile",
            Self::Escalate => "escalate",
        }
    }
}

/// Outcome of `register` or `complete_profile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationResult {
    Success(IdentityId),
    Failed {
        kind: FailureKind,
        cause: FailureCause,
        /// identity left without a profile, if any
        orphan: Option<IdentityId>,
    },
    ValidationError(ValidationError),
}

impl RegistrationResult {
    pub fn identity_failed(err: IdentityCreationError) -> Self {
        Self::Failed {
            kind: FailureKind::IdentityCreation,
            cause: err.into(),
            orphan: None,
        }
    }

    pub fn invariant_violation() -> Self {
        Self::Failed {
            kind: FailureKind::IdentityCreation,
            cause: FailureCause::InvariantViolation,
            orphan: None,
        }
    }

    pub fn profile_write_failed(id: IdentityId, err: ProfileWriteError) -> Self {
        Self::Failed {
            kind: FailureKind::ProfileWrite,
            cause: err.into(),
            orphan: Some(id),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True when an identity exists at the provider, with or without a profile
    pub fn identity_created(&self) -> bool {
        match self {
            Self::Success(_) => true,
            Self::Failed { orphan, .. } => orphan.is_some(),
            Self::ValidationError(_) => false,
        }
    }

    pub fn identity_id(&self) -> Option<&IdentityId> {
        match self {
            Self::Success(id) => Some(id),
            Self::Failed { orphan, .. } => orphan.as_ref(),
            Self::ValidationError(_) => None,
        }
    }

    pub fn state(&self) -> RegistrationState {
        match self {
            Self::Success(_) => RegistrationState::Complete,
            Self::ValidationError(_) => RegistrationState::Invalid,
            Self::Failed { orphan: Some(_), .. } => RegistrationState::FailedOrphanIdentity,
            Self::Failed { orphan: None, .. } => RegistrationState::FailedNoIdentity,
        }
    }

    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Success(_) => RecoveryAction::None,
            Self::ValidationError(_) => RecoveryAction::CorrectInput,
            Self::Failed {
                orphan: Some(id), ..
            } => RecoveryAction::CompleteProfile(id.clone()),
            Self::Failed { cause, .. } => match cause {
                FailureCause::Identity(
                    IdentityCreationError::EmailAlreadyInUse
                    | IdentityCreationError::WeakPassword { .. },
                ) => RecoveryAction::CorrectInput,
                FailureCause::Identity(
                    IdentityCreationError::ProviderUnavailable | IdentityCreationError::Unknown(_),
                ) => RecoveryAction::RetryRegister,
                // a profile failure without an orphan id cannot be repaired from here
                FailureCause::Profile(_) | FailureCause::InvariantViolation => {
                    RecoveryAction::Escalate
                }
            },
        }
    }
}
