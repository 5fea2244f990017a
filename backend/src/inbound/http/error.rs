//! HTTP mapping for registration failures.
//!
//! Field-level rejections surface their messages verbatim. Store and hashing
//! failures are logged with their internal detail and answered with a fixed
//! public message so nothing about the store leaks to clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use super::envelope::{ErrorResponse, FieldErrorsResponse};
use crate::domain::RegistrationError;

/// Result alias for registration handlers.
pub type ApiResult<T> = Result<T, RegistrationError>;

/// Public message for failed inserts and hashing failures.
pub const REGISTER_FAILED_MESSAGE: &str = "Failed to register.";
/// Public message when the store cannot be queried.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Database query error.";

impl ResponseError for RegistrationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) | Self::DuplicateFound(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable { .. }
            | Self::StoreWriteFailed { .. }
            | Self::HashingFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            Self::ValidationFailed(errors) | Self::DuplicateFound(errors) => {
                builder.json(FieldErrorsResponse::new(errors.clone()))
            }
            Self::StoreUnavailable { message } => {
                error!(%message, "registration store unavailable");
                builder.json(ErrorResponse::new(STORE_UNAVAILABLE_MESSAGE))
            }
            Self::StoreWriteFailed { message } | Self::HashingFailed { message } => {
                error!(%message, "registration failed");
                builder.json(ErrorResponse::new(REGISTER_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RegistrationField, ValidationErrorSet};
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn errors(field: RegistrationField, message: &str) -> ValidationErrorSet {
        let mut set = ValidationErrorSet::new();
        set.insert(field, message);
        set
    }

    async fn body_json(err: &RegistrationError) -> Value {
        let bytes = to_bytes(err.error_response().into_body())
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(
        RegistrationError::ValidationFailed(errors(RegistrationField::Email, "Email is required.")),
        StatusCode::BAD_REQUEST,
        json!({"success": false, "errors": {"email": "Email is required."}})
    )]
    #[case(
        RegistrationError::DuplicateFound(errors(
            RegistrationField::Username,
            "Username is already taken."
        )),
        StatusCode::BAD_REQUEST,
        json!({"success": false, "errors": {"username": "Username is already taken."}})
    )]
    #[case(
        RegistrationError::store_write_failed("duplicate key value"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"success": false, "error": "Failed to register."})
    )]
    #[case(
        RegistrationError::hashing_failed("salt too short"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"success": false, "error": "Failed to register."})
    )]
    #[case(
        RegistrationError::store_unavailable("connection refused"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"success": false, "error": "Database query error."})
    )]
    #[actix_web::test]
    async fn maps_error_to_status_and_envelope(
        #[case] err: RegistrationError,
        #[case] status: StatusCode,
        #[case] expected: Value,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(body_json(&err).await, expected);
    }

    #[actix_web::test]
    async fn internal_detail_is_not_exposed() {
        let err = RegistrationError::store_unavailable("password authentication failed for user");

        let body = body_json(&err).await.to_string();

        assert!(!body.contains("password authentication"));
    }
}
