//! Argon2id-backed `CredentialHasher` adapter.
//!
//! Every hash draws a fresh salt from the operating system RNG and is encoded
//! as a PHC string (`$argon2id$v=19$m=19456,t=2,p=1$...`) so the parameters
//! travel with the stored value.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
};

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Argon2id hasher using the crate's default (memory-hard) parameters.
#[derive(Debug, Default, Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|error| CredentialHashError::hashing(error.to_string()))?;
        Ok(PasswordHash::from_phc(hash.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        PhcHash::new(hash.as_str())
            .map(|parsed| {
                self.argon2
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
