//! Domain primitives, ports, and the registration use-case.
//!
//! Purpose: define strongly typed registration inputs, the persisted user
//! record, and the service that ties validation, uniqueness, hashing, and
//! persistence together. Types here are transport agnostic; inbound and
//! outbound adapters translate to and from them.
//!
//! Public surface:
//! - RegistrationRequest / ValidationErrorSet / RegistrationField: inputs and
//!   field-level failures.
//! - User and its components: the persisted account record.
//! - RegistrationError: terminal failure taxonomy.
//! - RegistrationService: the use-case behind [`ports::RegistrationCommand`].

pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod user;

pub use self::error::RegistrationError;
pub use self::registration::{
    RegistrationField, RegistrationRequest, ValidatedRegistration, ValidationErrorSet, age_on,
};
pub use self::registration_service::RegistrationService;
pub use self::user::{EmailAddress, PasswordHash, User, UserId, UserValidationError, Username};

/// Build the acknowledgement message returned for an input-click event.
///
/// # Examples
/// ```
/// use registration::domain::acknowledge_input;
///
/// assert_eq!(acknowledge_input("birthdate"), "Clicked on birthdate");
/// ```
pub fn acknowledge_input(label: &str) -> String {
    format!("Clicked on {label}")
}
