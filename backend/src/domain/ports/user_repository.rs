//! Driven port for the user store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The insert collided with an existing email or username.
        UniqueViolation { message: String } =>
            "user repository uniqueness violated: {message}",
    }
}

/// Store of registered users with uniqueness on email and username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user whose email equals `email` or whose username
    /// equals `username`.
    async fn find_conflicts(
        &self,
        email: &EmailAddress,
        username: &Username,
    ) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a new user atomically.
    ///
    /// Adapters must fail with [`UserPersistenceError::UniqueViolation`] when
    /// the email or username is already taken, leaving the store unchanged.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;
}
