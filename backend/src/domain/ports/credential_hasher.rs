//! Driven port for one-way credential hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum CredentialHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, one-way password hashing.
///
/// Implementations must draw a fresh random salt for every call to
/// [`CredentialHasher::hash`].
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed hashes never verify.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool;
}
