//! Validation and derived-field coverage for directory entries.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn person() -> Person {
    let draft = PersonDraft::try_from_parts("Youseff", Some("044-434343"), "Avenida Fullstack", "Mataro")
        .expect("valid draft");
    Person::from_draft(PersonId::random(), draft)
}

#[rstest]
#[case("", Some("12345"), "X", "Y", PersonValidationError::EmptyName)]
#[case("    ", None, "X", "Y", PersonValidationError::EmptyName)]
#[case("Bob", None, "X", "Y", PersonValidationError::NameTooShort { min: PERSON_NAME_MIN })]
#[case("Robert", Some("1234"), "X", "Y", PersonValidationError::PhoneTooShort { min: PHONE_NUMBER_MIN })]
#[case("Robert", None, " ", "Y", PersonValidationError::EmptyStreet)]
#[case("Robert", None, "X", "", PersonValidationError::EmptyCity)]
fn draft_rejects_invalid_fields(
    #[case] name: &str,
    #[case] phone: Option<&str>,
    #[case] street: &str,
    #[case] city: &str,
    #[case] expected: PersonValidationError,
) {
    let err = PersonDraft::try_from_parts(name, phone, street, city).expect_err("invalid draft");
    assert_eq!(err, expected);
}

#[rstest]
fn name_length_counts_characters_not_bytes() {
    assert!(PersonName::new("Ñoño").is_ok());
}

#[rstest]
fn validation_errors_name_their_field() {
    let err = PersonValidationError::PhoneTooShort { min: PHONE_NUMBER_MIN };
    assert_eq!(err.field(), "phone");
    assert_eq!(err.code(), "phone_too_short");
    assert_eq!(err.to_string(), "phone must be at least 5 characters");
}

#[rstest]
fn address_is_composed_from_street_and_city(person: Person) {
    let first = person.address();
    let second = person.address();
    assert_eq!(first, second);
    assert_eq!(first.street, "Avenida Fullstack");
    assert_eq!(first.city, "Mataro");
}

#[rstest]
fn with_phone_only_changes_phone(person: Person) {
    let updated = person
        .clone()
        .with_phone(PhoneNumber::new("123-456").expect("valid phone"));
    assert_eq!(updated.id(), person.id());
    assert_eq!(updated.name(), person.name());
    assert_eq!(updated.phone().map(AsRef::as_ref), Some("123-456"));
    assert_eq!(updated.address(), person.address());
}

#[rstest]
fn person_id_rejects_non_uuid() {
    assert_eq!(PersonId::new("nope"), Err(PersonValidationError::InvalidId));
}

#[rstest]
fn newtypes_reject_invalid_json() {
    let result: Result<PersonName, _> = serde_json::from_str("\"Al\"");
    assert!(result.is_err());
}
