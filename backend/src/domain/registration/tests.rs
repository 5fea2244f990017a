//! Tests for registration field validation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[fixture]
fn today() -> NaiveDate {
    date(2026, 10, 19)
}

#[fixture]
fn valid_request() -> RegistrationRequest {
    RegistrationRequest {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        username: "ada_lovelace".into(),
        email: "ada@example.com".into(),
        password: Zeroizing::new("analytical".into()),
        repeat_password: Zeroizing::new("analytical".into()),
        birthdate: "1990-12-10".into(),
    }
}

fn errors_for(request: RegistrationRequest, today: NaiveDate) -> ValidationErrorSet {
    request
        .validate(today)
        .expect_err("request should fail validation")
}

#[rstest]
fn valid_request_passes_and_trims_text_fields(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
) {
    valid_request.first_name = "  Ada ".into();
    valid_request.email = " ada@example.com\t".into();

    let validated = valid_request.validate(today).expect("valid request");

    assert_eq!(validated.first_name, "Ada");
    assert_eq!(validated.last_name, "Lovelace");
    assert_eq!(validated.username.as_ref(), "ada_lovelace");
    assert_eq!(validated.email.as_ref(), "ada@example.com");
    assert_eq!(validated.password.as_str(), "analytical");
    assert_eq!(validated.birthdate, date(1990, 12, 10));
}

#[rstest]
fn long_text_fields_are_accepted_unchanged(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
) {
    let long_name = "A".repeat(300);
    valid_request.first_name = long_name.clone();
    valid_request.username = "u".repeat(300);
    valid_request.email = format!("{}@example.com", "a".repeat(300));

    let validated = valid_request.validate(today).expect("no upper length bound");

    assert_eq!(validated.first_name, long_name);
    assert_eq!(validated.username.as_ref().len(), 300);
}

#[rstest]
fn empty_submission_reports_every_required_field(today: NaiveDate) {
    let errors = errors_for(RegistrationRequest::default(), today);

    assert_eq!(errors.get(RegistrationField::FirstName), Some("First name is required."));
    assert_eq!(errors.get(RegistrationField::LastName), Some("Last name is required."));
    assert_eq!(errors.get(RegistrationField::Username), Some("Username is required."));
    assert_eq!(errors.get(RegistrationField::Email), Some("Email is required."));
    assert_eq!(errors.get(RegistrationField::Password), Some("Password is required."));
    assert_eq!(errors.get(RegistrationField::Birthdate), Some("Birthdate is required."));
    // Both passwords are empty, so they still match.
    assert!(!errors.contains(RegistrationField::RepeatPassword));
    assert_eq!(errors.len(), 6);
}

#[rstest]
#[case::first_name(RegistrationField::FirstName)]
#[case::last_name(RegistrationField::LastName)]
#[case::username(RegistrationField::Username)]
#[case::email(RegistrationField::Email)]
#[case::birthdate(RegistrationField::Birthdate)]
fn whitespace_only_fields_count_as_missing(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
    #[case] field: RegistrationField,
) {
    let blank = "   ".to_owned();
    match field {
        RegistrationField::FirstName => valid_request.first_name = blank,
        RegistrationField::LastName => valid_request.last_name = blank,
        RegistrationField::Username => valid_request.username = blank,
        RegistrationField::Email => valid_request.email = blank,
        RegistrationField::Birthdate => valid_request.birthdate = blank,
        other => panic!("unexpected case {other}"),
    }

    let errors = errors_for(valid_request, today);

    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
}

#[rstest]
#[case("ada lovelace")]
#[case("ada-lovelace")]
#[case("ada!")]
fn username_outside_token_charset_is_rejected_alongside_other_errors(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
    #[case] username: &str,
) {
    valid_request.username = username.into();
    valid_request.email = String::new();

    let errors = errors_for(valid_request, today);

    assert_eq!(
        errors.get(RegistrationField::Username),
        Some("Username can only contain letters, numbers, and underscores.")
    );
    assert!(errors.contains(RegistrationField::Email));
}

#[rstest]
#[case::seven_chars("sevench", true)]
#[case::eight_chars("eightchr", false)]
#[case::multibyte_eight_chars("ééééééé1", false)]
fn password_minimum_length_is_eight_characters(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
    #[case] password: &str,
    #[case] rejected: bool,
) {
    valid_request.password = Zeroizing::new(password.into());
    valid_request.repeat_password = Zeroizing::new(password.into());

    let result = valid_request.validate(today);

    match (rejected, result) {
        (true, Err(errors)) => assert_eq!(
            errors.get(RegistrationField::Password),
            Some("Password must be at least 8 characters long.")
        ),
        (false, Ok(_)) => {}
        (true, Ok(_)) => panic!("expected password length error"),
        (false, Err(errors)) => panic!("unexpected errors: {errors:?}"),
    }
}

#[rstest]
fn mismatched_confirmation_is_reported_even_when_both_are_long_enough(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
) {
    valid_request.repeat_password = Zeroizing::new("analytica1".into());

    let errors = errors_for(valid_request, today);

    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        vec![(RegistrationField::RepeatPassword, "Passwords do not match.")]
    );
}

#[rstest]
#[case::exactly_eighteen("2008-10-19", true)]
#[case::one_day_short("2008-10-20", false)]
#[case::well_over("1950-01-01", true)]
#[case::future_date("2040-01-01", false)]
fn birthdate_enforces_minimum_age(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
    #[case] birthdate: &str,
    #[case] accepted: bool,
) {
    valid_request.birthdate = birthdate.into();

    let result = valid_request.validate(today);

    match (accepted, result) {
        (true, Ok(validated)) => assert_eq!(validated.birthdate.to_string(), birthdate),
        (false, Err(errors)) => assert_eq!(
            errors.get(RegistrationField::Birthdate),
            Some("You must be at least 18 years old.")
        ),
        (true, Err(errors)) => panic!("unexpected errors: {errors:?}"),
        (false, Ok(_)) => panic!("expected age error"),
    }
}

#[rstest]
#[case("19/10/2000")]
#[case("2000-02-30")]
#[case("yesterday")]
fn unparseable_birthdate_is_rejected(
    mut valid_request: RegistrationRequest,
    today: NaiveDate,
    #[case] birthdate: &str,
) {
    valid_request.birthdate = birthdate.into();

    let errors = errors_for(valid_request, today);

    assert_eq!(
        errors.get(RegistrationField::Birthdate),
        Some("Birthdate must be a valid date (YYYY-MM-DD).")
    );
}

#[rstest]
#[case(date(2008, 2, 29), date(2026, 2, 28), 17)]
#[case(date(2008, 2, 29), date(2026, 3, 1), 18)]
#[case(date(2000, 6, 15), date(2026, 6, 14), 25)]
#[case(date(2000, 6, 15), date(2026, 6, 15), 26)]
#[case(date(2030, 1, 1), date(2026, 1, 1), -4)]
fn age_counts_whole_years(
    #[case] birthdate: NaiveDate,
    #[case] today: NaiveDate,
    #[case] expected: i32,
) {
    assert_eq!(age_on(birthdate, today), expected);
}

#[rstest]
fn error_set_keeps_first_message_and_serialises_with_wire_names() {
    let mut errors = ValidationErrorSet::new();
    errors.insert(RegistrationField::RepeatPassword, "Passwords do not match.");
    errors.insert(RegistrationField::FirstName, "First name is required.");
    errors.insert(RegistrationField::FirstName, "ignored");

    assert_eq!(
        serde_json::to_value(&errors).expect("serialise errors"),
        json!({
            "first_name": "First name is required.",
            "repeatPassword": "Passwords do not match.",
        })
    );
    assert_eq!(errors.to_string(), "invalid fields: first_name, repeatPassword");
}

#[rstest]
fn debug_output_never_contains_passwords(valid_request: RegistrationRequest, today: NaiveDate) {
    let rendered = format!("{valid_request:?}");
    assert!(!rendered.contains("analytical"));

    let validated = valid_request.validate(today).expect("valid request");
    assert!(!format!("{validated:?}").contains("analytical"));
}
