//! Registration request, field tags, and field-level validation.
//!
//! Validation is exhaustive rather than fail-fast: every field is checked and
//! each violation is recorded in a [`ValidationErrorSet`] so callers can fix
//! all problems from a single response.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Minimum number of characters accepted for a password.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Minimum age, in whole years, required to register.
pub const MINIMUM_AGE_YEARS: i32 = 18;
/// Accepted birthdate format (ISO 8601 calendar date).
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Tag identifying a submitted registration field.
///
/// Serialises to the wire name used by form submissions and error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegistrationField {
    #[serde(rename = "first_name")]
    FirstName,
    #[serde(rename = "last_name")]
    LastName,
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "repeatPassword")]
    RepeatPassword,
    #[serde(rename = "birthdate")]
    Birthdate,
}

impl RegistrationField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::RepeatPassword => "repeatPassword",
            Self::Birthdate => "birthdate",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from field to human-readable message.
///
/// ## Invariants
/// - At most one message per field; the first recorded message wins.
///
/// # Examples
/// ```
/// use registration::domain::{RegistrationField, ValidationErrorSet};
///
/// let mut errors = ValidationErrorSet::new();
/// errors.insert(RegistrationField::Email, "Email is required.");
/// assert_eq!(errors.get(RegistrationField::Email), Some("Email is required."));
/// assert_eq!(
///     serde_json::to_value(&errors).expect("serialise"),
///     serde_json::json!({ "email": "Email is required." })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrorSet(BTreeMap<RegistrationField, String>);

impl ValidationErrorSet {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already present.
    pub fn insert(&mut self, field: RegistrationField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a message is recorded for `field`.
    pub fn contains(&self, field: RegistrationField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields carrying a message, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = RegistrationField> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(field, message)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().map(RegistrationField::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Raw registration submission.
///
/// Password values are zeroized on drop and never printed by `Debug`.
#[derive(Clone, Default)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub repeat_password: Zeroizing<String>,
    pub birthdate: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("repeat_password", &"<redacted>")
            .field("birthdate", &self.birthdate)
            .finish()
    }
}

/// Registration fields that passed every field-level rule.
///
/// The password confirmation has been consumed; only the plaintext password
/// survives, still zeroized on drop, until it is hashed.
pub struct ValidatedRegistration {
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub password: Zeroizing<String>,
    pub birthdate: NaiveDate,
}

impl fmt::Debug for ValidatedRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("birthdate", &self.birthdate)
            .finish_non_exhaustive()
    }
}

impl RegistrationRequest {
    /// Apply every field rule, collecting all violations.
    ///
    /// `today` anchors the minimum-age check.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use registration::domain::{RegistrationField, RegistrationRequest};
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    /// let errors = RegistrationRequest::default()
    ///     .validate(today)
    ///     .expect_err("empty submission is rejected");
    /// assert!(errors.contains(RegistrationField::FirstName));
    /// assert!(errors.contains(RegistrationField::Birthdate));
    /// ```
    pub fn validate(self, today: NaiveDate) -> Result<ValidatedRegistration, ValidationErrorSet> {
        let mut errors = ValidationErrorSet::new();

        let first_name = required_text(
            &self.first_name,
            RegistrationField::FirstName,
            "First name is required.",
            &mut errors,
        );
        let last_name = required_text(
            &self.last_name,
            RegistrationField::LastName,
            "Last name is required.",
            &mut errors,
        );
        let username = record(
            Username::new(&self.username),
            RegistrationField::Username,
            &mut errors,
        );
        let email = record(
            EmailAddress::new(&self.email),
            RegistrationField::Email,
            &mut errors,
        );

        if self.password.is_empty() {
            errors.insert(RegistrationField::Password, "Password is required.");
        } else if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.insert(
                RegistrationField::Password,
                format!("Password must be at least {PASSWORD_MIN_LENGTH} characters long."),
            );
        }

        if self.password.as_str() != self.repeat_password.as_str() {
            errors.insert(RegistrationField::RepeatPassword, "Passwords do not match.");
        }

        let birthdate = validate_birthdate(&self.birthdate, today, &mut errors);

        match (first_name, last_name, username, email, birthdate) {
            (Some(first_name), Some(last_name), Some(username), Some(email), Some(birthdate))
                if errors.is_empty() =>
            {
                Ok(ValidatedRegistration {
                    first_name,
                    last_name,
                    username,
                    email,
                    password: self.password,
                    birthdate,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(
    value: &str,
    field: RegistrationField,
    message: &str,
    errors: &mut ValidationErrorSet,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn record<T>(
    result: Result<T, UserValidationError>,
    field: RegistrationField,
    errors: &mut ValidationErrorSet,
) -> Option<T> {
    result
        .map_err(|error| errors.insert(field, error.to_string()))
        .ok()
}

fn validate_birthdate(
    raw: &str,
    today: NaiveDate,
    errors: &mut ValidationErrorSet,
) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(RegistrationField::Birthdate, "Birthdate is required.");
        return None;
    }

    let Ok(birthdate) = NaiveDate::parse_from_str(raw, BIRTHDATE_FORMAT) else {
        errors.insert(
            RegistrationField::Birthdate,
            "Birthdate must be a valid date (YYYY-MM-DD).",
        );
        return None;
    };

    if age_on(birthdate, today) < MINIMUM_AGE_YEARS {
        errors.insert(
            RegistrationField::Birthdate,
            format!("You must be at least {MINIMUM_AGE_YEARS} years old."),
        );
        return None;
    }

    Some(birthdate)
}

/// Whole years elapsed between `birthdate` and `today`.
///
/// Negative when `birthdate` lies in the future. A 29 February birthday is
/// reached on 1 March in common years.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years - 1
    } else {
        years
    }
}

#[cfg(test)]
mod tests;
