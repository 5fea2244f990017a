//! Domain-level registration errors.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use super::registration::ValidationErrorSet;

/// Terminal outcome of a failed registration attempt.
///
/// `ValidationFailed` and `DuplicateFound` are caller-fixable. The remaining
/// variants are infrastructure failures; their messages are for logs only and
/// never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// One or more fields failed validation; the store was not touched.
    #[error("registration rejected: {0}")]
    ValidationFailed(ValidationErrorSet),
    /// The email and/or username already belong to a stored user.
    #[error("registration conflicts with an existing user: {0}")]
    DuplicateFound(ValidationErrorSet),
    /// The store could not be reached or queried.
    #[error("user store unavailable: {message}")]
    StoreUnavailable { message: String },
    /// The store rejected the insert; nothing was persisted.
    #[error("user store rejected the new record: {message}")]
    StoreWriteFailed { message: String },
    /// The password could not be hashed.
    #[error("credential hashing failed: {message}")]
    HashingFailed { message: String },
}

impl RegistrationError {
    /// Convenience constructor for [`RegistrationError::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RegistrationError::StoreWriteFailed`].
    pub fn store_write_failed(message: impl Into<String>) -> Self {
        Self::StoreWriteFailed {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RegistrationError::HashingFailed`].
    pub fn hashing_failed(message: impl Into<String>) -> Self {
        Self::HashingFailed {
            message: message.into(),
        }
    }

    /// Field errors carried by caller-fixable variants.
    pub fn field_errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            Self::ValidationFailed(errors) | Self::DuplicateFound(errors) => Some(errors),
            Self::StoreUnavailable { .. }
            | Self::StoreWriteFailed { .. }
            | Self::HashingFailed { .. } => None,
        }
    }
}
