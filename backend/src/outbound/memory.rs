//! In-process `UserRepository` used when no database is configured.
//!
//! The store enforces the same uniqueness rules as the PostgreSQL schema so
//! the registration flow behaves identically in development and tests. Data
//! lives only as long as the process.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, Username};

/// Mutex-guarded vector of users.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().collect()),
        }
    }

    /// Copy of every stored user, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_conflicts(
        &self,
        email: &EmailAddress,
        username: &Username,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .filter(|user| user.has_email(email) || user.has_username(username))
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if let Some(existing) = users
            .iter()
            .find(|existing| existing.has_email(&user.email) || existing.has_username(&user.username))
        {
            let column = if existing.has_email(&user.email) {
                "email"
            } else {
                "username"
            };
            return Err(UserPersistenceError::unique_violation(format!(
                "duplicate {column}"
            )));
        }
        users.push(user.clone());
        Ok(())
    }
}
