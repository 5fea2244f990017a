//! JSON envelopes shared by every registration endpoint response.
//!
//! Successful calls carry a `message`, field-level rejections an `errors`
//! object, and everything else a single `error` string. `success` tells
//! clients which shape to expect.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ValidationErrorSet;

/// Positive outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    /// Always `true`.
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Registration successful.")]
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Rejection listing one message per offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorsResponse {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Field name to message.
    #[schema(
        value_type = std::collections::BTreeMap<String, String>,
        example = json!({"email": "Email is already registered."})
    )]
    pub errors: ValidationErrorSet,
}

impl FieldErrorsResponse {
    pub fn new(errors: ValidationErrorSet) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// Failure with a single public message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Failed to register.")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
