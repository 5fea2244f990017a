//! Registered user record and its validated components.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

/// Validation errors raised by the user component constructors.
///
/// The `Display` output is the human-readable message returned to callers in
/// a [`ValidationErrorSet`](crate::domain::ValidationErrorSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameInvalidCharacters,
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username is required."),
            Self::UsernameInvalidCharacters => write!(
                f,
                "Username can only contain letters, numbers, and underscores."
            ),
            Self::EmptyEmail => write!(f, "Email is required."),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login handle made of ASCII letters, digits, and underscores.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Matches `^[A-Za-z0-9_]+$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use registration::domain::Username;
    ///
    /// let username = Username::new("  ada_99 ").expect("valid username");
    /// assert_eq!(username.as_ref(), "ada_99");
    /// assert!(Username::new("ada!").is_err());
    /// ```
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Contact email address.
///
/// Only presence is enforced; no format or deliverability checks are made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Construct an [`EmailAddress`] from a non-blank value, trimming it.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One-way, salted password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded PHC string produced by a credential hasher or read
    /// back from storage.
    pub fn from_phc(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Persisted account created by a successful registration.
///
/// ## Invariants
/// - `username` and `email` are unique across all stored users.
/// - `password_hash` never holds plaintext.
/// - Records are written once and never mutated by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub birthdate: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this record shares the given email.
    pub fn has_email(&self, email: &EmailAddress) -> bool {
        &self.email == email
    }

    /// Whether this record shares the given username.
    pub fn has_username(&self, username: &Username) -> bool {
        &self.username == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada")]
    #[case("Ada_Lovelace_1815")]
    #[case("___")]
    #[case("  padded  ")]
    fn username_accepts_token_charset(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("ada lovelace")]
    #[case("ada-lovelace")]
    #[case("ada@example")]
    #[case("adá")]
    #[case("ada.l")]
    fn username_rejects_characters_outside_token_charset(#[case] raw: &str) {
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameInvalidCharacters)
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn username_rejects_blank_values(#[case] raw: &str) {
        assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
    }

    #[rstest]
    fn email_only_requires_presence() {
        let email = EmailAddress::new(" not-really-an-email ").expect("present email");
        assert_eq!(email.as_ref(), "not-really-an-email");
        assert_eq!(EmailAddress::new(" "), Err(UserValidationError::EmptyEmail));
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
