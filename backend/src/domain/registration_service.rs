//! Domain service orchestrating account registration.
//!
//! The sequence is strictly linear: validate every field, check the store for
//! conflicting email/username, hash the password, insert the record. Each
//! failure is terminal and leaves the store untouched.
//!
//! The uniqueness check and the insert are not atomic. Two concurrent
//! registrations for the same email or username can both pass the check; the
//! store's unique constraints decide the winner and the loser surfaces as
//! [`RegistrationError::StoreWriteFailed`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHasher, RegistrationCommand, UserPersistenceError, UserRepository,
};
use crate::domain::registration::{RegistrationField, ValidatedRegistration, ValidationErrorSet};
use crate::domain::user::{EmailAddress, User, UserId, Username};
use crate::domain::{PasswordHash, RegistrationError, RegistrationRequest};

/// Registration use-case backed by injected store, hasher, and clock.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    /// Create a new service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    async fn ensure_unique(
        &self,
        email: &EmailAddress,
        username: &Username,
    ) -> Result<(), RegistrationError> {
        let matches = self
            .users
            .find_conflicts(email, username)
            .await
            .map_err(|error| {
                warn!(%error, "user lookup failed");
                RegistrationError::store_unavailable(error.to_string())
            })?;

        let duplicates = duplicate_fields(&matches, email, username);
        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::DuplicateFound(duplicates))
        }
    }

    /// Run the hasher on the blocking pool, off the async worker thread.
    async fn hash_password(
        &self,
        password: Zeroizing<String>,
    ) -> Result<PasswordHash, RegistrationError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|error| {
                warn!(%error, "password hashing task did not complete");
                RegistrationError::hashing_failed(error.to_string())
            })?
            .map_err(|error| RegistrationError::hashing_failed(error.to_string()))
    }

    async fn build_user(
        &self,
        registration: ValidatedRegistration,
    ) -> Result<User, RegistrationError> {
        let ValidatedRegistration {
            first_name,
            last_name,
            username,
            email,
            password,
            birthdate,
        } = registration;

        let password_hash = self.hash_password(password).await?;

        Ok(User {
            id: UserId::random(),
            first_name,
            last_name,
            username,
            email,
            password_hash,
            birthdate,
            created_at: self.clock.utc(),
        })
    }

    async fn persist(&self, user: &User) -> Result<(), RegistrationError> {
        self.users.insert(user).await.map_err(|error| match error {
            UserPersistenceError::Connection { message } => {
                warn!(%message, "user insert could not reach the store");
                RegistrationError::store_unavailable(message)
            }
            UserPersistenceError::UniqueViolation { message } => {
                warn!(%message, username = %user.username, "lost registration race");
                RegistrationError::store_write_failed(message)
            }
            UserPersistenceError::Query { message } => {
                warn!(%message, "user insert failed");
                RegistrationError::store_write_failed(message)
            }
        })
    }
}

/// Check both predicates against every returned row so a username clash on
/// one row and an email clash on another are both reported.
fn duplicate_fields(
    matches: &[User],
    email: &EmailAddress,
    username: &Username,
) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();
    if matches.iter().any(|user| user.has_email(email)) {
        errors.insert(RegistrationField::Email, "Email is already registered.");
    }
    if matches.iter().any(|user| user.has_username(username)) {
        errors.insert(RegistrationField::Username, "Username is already taken.");
    }
    errors
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(&self, request: RegistrationRequest) -> Result<User, RegistrationError> {
        let today = self.clock.utc().date_naive();
        let registration = request.validate(today).map_err(|errors| {
            debug!(fields = %errors, "registration failed validation");
            RegistrationError::ValidationFailed(errors)
        })?;

        self.ensure_unique(&registration.email, &registration.username)
            .await
            .inspect_err(|error| {
                if let RegistrationError::DuplicateFound(errors) = error {
                    debug!(fields = %errors, "registration conflicts with stored user");
                }
            })?;

        let user = self.build_user(registration).await?;
        self.persist(&user).await?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}
