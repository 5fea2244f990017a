//! Driving port for the registration use-case.
//!
//! Inbound adapters call this port to register accounts without knowing the
//! backing store or hashing primitive, so HTTP handler tests can substitute a
//! test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{RegistrationError, RegistrationRequest, User};

/// Domain use-case port for account registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate, check uniqueness, hash, and persist a new user.
    async fn register(&self, request: RegistrationRequest) -> Result<User, RegistrationError>;
}
