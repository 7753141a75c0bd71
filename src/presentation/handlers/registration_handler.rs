use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::{IdentityCreationError, ProfileWriteError},
        models::registration::{FailureCause, RegistrationResult},
        repositories::{identity_provider::IdentityProvider, profile_store::ProfileStore},
    },
    usecase::registration_coordinator::RegistrationCoordinator,
};

// Request

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// json for completing the profile of an existing identity
#[derive(Serialize, Deserialize)]
pub struct CompleteProfileRequest {
    pub name: String,
    pub email: String,
}

// Response

/// json for every registration outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub status: String,
    pub id: Option<String>,
    pub identity_created: bool,
    pub kind: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub field: Option<String>,
    pub recovery: String,
}

impl From<&RegistrationResult> for RegistrationResponse {
    fn from(result: &RegistrationResult) -> Self {
        let (kind, error, message, field) = match result {
            RegistrationResult::Success(_) => (None, None, None, None),
            RegistrationResult::Failed { kind, cause, .. } => (
                Some(kind.as_str().to_string()),
                Some(cause.code().to_string()),
                Some(cause.to_string()),
                None,
            ),
            RegistrationResult::ValidationError(err) => (
                None,
                Some("validation_error".to_string()),
                Some(err.to_string()),
                Some(err.field.as_str().to_string()),
            ),
        };

        Self {
            status: result.state().as_str().to_string(),
            id: result.identity_id().map(|id| id.to_string()),
            identity_created: result.identity_created(),
            kind,
            error,
            message,
            field,
            recovery: result.recovery().code().to_string(),
        }
    }
}

/// http status for a result; `success` is used for the complete state
fn status_for(result: &RegistrationResult, success: StatusCode) -> StatusCode {
    match result {
        RegistrationResult::Success(_) => success,
        RegistrationResult::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistrationResult::Failed { cause, .. } => match cause {
            FailureCause::Identity(IdentityCreationError::EmailAlreadyInUse) => StatusCode::CONFLICT,
            FailureCause::Identity(IdentityCreationError::WeakPassword { .. }) => {
                StatusCode::BAD_REQUEST
            }
            FailureCause::Identity(IdentityCreationError::ProviderUnavailable)
            | FailureCause::Profile(ProfileWriteError::Unavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            FailureCause::Identity(IdentityCreationError::Unknown(_))
            | FailureCause::Profile(_) => StatusCode::BAD_GATEWAY,
            FailureCause::InvariantViolation => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn respond(
    result: &RegistrationResult,
    success: StatusCode,
) -> (StatusCode, Json<RegistrationResponse>) {
    (
        status_for(result, success),
        Json(RegistrationResponse::from(result)),
    )
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_registration_router<I, S>(coordinator: RegistrationCoordinator<I, S>) -> Router
where
    I: IdentityProvider + 'static,
    S: ProfileStore + 'static,
{
    let state = AppState {
        coordinator: Arc::new(coordinator),
    };

    Router::new()
        .route("/register", post(register::<I, S>))
        .route("/profiles/{id}", put(complete_profile::<I, S>))
        .with_state(state)
}

pub struct AppState<I: IdentityProvider, S: ProfileStore> {
    pub coordinator: Arc<RegistrationCoordinator<I, S>>,
}

impl<I: IdentityProvider, S: ProfileStore> Clone for AppState<I, S> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

// handler function

/// handler function for register
async fn register<I: IdentityProvider + 'static, S: ProfileStore + 'static>(
    State(state): State<AppState<I, S>>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let result = state
        .coordinator
        .register(payload.name, payload.email, payload.password)
        .await;
    respond(&result, StatusCode::CREATED)
}

/// handler function for writing the profile of an identity created earlier
async fn complete_profile<I: IdentityProvider + 'static, S: ProfileStore + 'static>(
    State(state): State<AppState<I, S>>,
    Path(id): Path<String>,
    Json(payload): Json<CompleteProfileRequest>,
) -> impl IntoResponse {
    let result = state
        .coordinator
        .complete_profile(id, payload.name, payload.email)
        .await;
    respond(&result, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::models::identity::IdentityId;

    #[rstest]
    #[case(IdentityCreationError::EmailAlreadyInUse, StatusCode::CONFLICT)]
    #[case(IdentityCreationError::WeakPassword { min_length: 6 }, StatusCode::BAD_REQUEST)]
    #[case(IdentityCreationError::ProviderUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(IdentityCreationError::Unknown("x".to_string()), StatusCode::BAD_GATEWAY)]
    fn test_identity_failure_status(#[case] err: IdentityCreationError, #[case] expected: StatusCode) {
        let result = RegistrationResult::identity_failed(err);
        assert_eq!(status_for(&result, StatusCode::CREATED), expected);
    }

    #[rstest]
    #[case(ProfileWriteError::Unavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ProfileWriteError::PermissionDenied, StatusCode::BAD_GATEWAY)]
    fn test_profile_failure_status(#[case] err: ProfileWriteError, #[case] expected: StatusCode) {
        let result = RegistrationResult::profile_write_failed(IdentityId::new("uid-1").unwrap(), err);
        assert_eq!(status_for(&result, StatusCode::CREATED), expected);
    }

    #[test]
    fn test_invariant_violation_status() {
        let result = RegistrationResult::invariant_violation();
        assert_eq!(
            status_for(&result, StatusCode::CREATED),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_outlives_result() {
        let (status, Json(body)) = {
            let result = RegistrationResult::Success(IdentityId::new("uid-2").unwrap());
            respond(&result, StatusCode::CREATED)
        };

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.status, "complete");
        assert_eq!(body.id.as_deref(), Some("uid-2"));
    }

    #[test]
    fn test_orphan_response_body() {
        let result = RegistrationResult::profile_write_failed(
            IdentityId::new("uid-9").unwrap(),
            ProfileWriteError::Unavailable,
        );
        let response = RegistrationResponse::from(&result);

        assert_eq!(response.status, "failed_orphan_identity");
        assert_eq!(response.id.as_deref(), Some("uid-9"));
        assert!(response.identity_created);
        assert_eq!(response.kind.as_deref(), Some("profile_write"));
        assert_eq!(response.error.as_deref(), Some("store_unavailable"));
        assert_eq!(response.recovery, "complete_profile");
    }
}
