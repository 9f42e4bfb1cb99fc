//! Directory entries.
//!
//! A [`Person`] is only ever built from validated components, so code holding
//! one can rely on the field constraints without re-checking them. The
//! `address` seen by clients is derived on read via [`Person::address`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum length of a person's name, in characters.
pub const PERSON_NAME_MIN: usize = 4;
/// Minimum length of a phone number, in characters.
pub const PHONE_NUMBER_MIN: usize = 5;

/// Validation errors raised while building a [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonValidationError {
    /// Identifier was not a UUID.
    #[error("person id must be a valid UUID")]
    InvalidId,
    /// Name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Name was shorter than [`PERSON_NAME_MIN`].
    #[error("name must be at least {min} characters")]
    NameTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Phone was shorter than [`PHONE_NUMBER_MIN`].
    #[error("phone must be at least {min} characters")]
    PhoneTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Street was blank.
    #[error("street must not be empty")]
    EmptyStreet,
    /// City was blank.
    #[error("city must not be empty")]
    EmptyCity,
}

impl PersonValidationError {
    /// Argument the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooShort { .. } => "name",
            Self::PhoneTooShort { .. } => "phone",
            Self::EmptyStreet => "street",
            Self::EmptyCity => "city",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameTooShort { .. } => "name_too_short",
            Self::PhoneTooShort { .. } => "phone_too_short",
            Self::EmptyStreet => "empty_street",
            Self::EmptyCity => "empty_city",
        }
    }
}

/// Opaque identifier assigned when a person is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PersonValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| PersonValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = PersonValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_newtype!(
    /// Unique display name of a directory entry.
    PersonName
);
string_newtype!(
    /// Phone number; the directory stores it verbatim.
    PhoneNumber
);
string_newtype!(
    /// Street line of an address.
    Street
);
string_newtype!(
    /// City of an address.
    City
);

fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl PersonName {
    /// Validate a name: non-blank and at least [`PERSON_NAME_MIN`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self, PersonValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        if char_len(&name) < PERSON_NAME_MIN {
            return Err(PersonValidationError::NameTooShort {
                min: PERSON_NAME_MIN,
            });
        }
        Ok(Self(name))
    }
}

impl PhoneNumber {
    /// Validate a phone number of at least [`PHONE_NUMBER_MIN`] characters.
    pub fn new(phone: impl Into<String>) -> Result<Self, PersonValidationError> {
        let phone = phone.into();
        if char_len(&phone) < PHONE_NUMBER_MIN {
            return Err(PersonValidationError::PhoneTooShort {
                min: PHONE_NUMBER_MIN,
            });
        }
        Ok(Self(phone))
    }
}

impl Street {
    /// Validate a non-blank street.
    pub fn new(street: impl Into<String>) -> Result<Self, PersonValidationError> {
        let street = street.into();
        if street.trim().is_empty() {
            return Err(PersonValidationError::EmptyStreet);
        }
        Ok(Self(street))
    }
}

impl City {
    /// Validate a non-blank city.
    pub fn new(city: impl Into<String>) -> Result<Self, PersonValidationError> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(PersonValidationError::EmptyCity);
        }
        Ok(Self(city))
    }
}

/// Address composed from a person's street and city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address<'a> {
    /// Street line.
    pub street: &'a str,
    /// City.
    pub city: &'a str,
}

/// Validated candidate for a new directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    name: PersonName,
    phone: Option<PhoneNumber>,
    street: Street,
    city: City,
}

impl PersonDraft {
    /// Validate raw inputs into a draft.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::domain::PersonDraft;
    ///
    /// let draft = PersonDraft::try_from_parts("Itzi", None, "Pasaje Testing", "Ibiza")
    ///     .expect("valid draft");
    /// assert!(draft.phone().is_none());
    /// ```
    pub fn try_from_parts(
        name: &str,
        phone: Option<&str>,
        street: &str,
        city: &str,
    ) -> Result<Self, PersonValidationError> {
        Ok(Self {
            name: PersonName::new(name)?,
            phone: phone.map(PhoneNumber::new).transpose()?,
            street: Street::new(street)?,
            city: City::new(city)?,
        })
    }

    /// Candidate name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Candidate phone.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }
}

/// Directory entry.
///
/// ## Invariants
/// - `name` is unique across the directory (enforced by the store).
/// - Only `phone` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: PersonName,
    phone: Option<PhoneNumber>,
    street: Street,
    city: City,
}

impl Person {
    /// Assign an identifier to a validated draft.
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Self {
        let PersonDraft {
            name,
            phone,
            street,
            city,
        } = draft;
        Self {
            id,
            name,
            phone,
            street,
            city,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Unique name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Phone number, when known.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Street line.
    pub fn street(&self) -> &Street {
        &self.street
    }

    /// City.
    pub fn city(&self) -> &City {
        &self.city
    }

    /// Derived address; pure over `street` and `city`.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::domain::{Person, PersonDraft, PersonId};
    ///
    /// let draft = PersonDraft::try_from_parts("Robert", None, "X", "Y").expect("draft");
    /// let person = Person::from_draft(PersonId::random(), draft);
    /// let address = person.address();
    /// assert_eq!((address.street, address.city), ("X", "Y"));
    /// ```
    pub fn address(&self) -> Address<'_> {
        Address {
            street: self.street.as_ref(),
            city: self.city.as_ref(),
        }
    }

    /// Copy of this person with `phone` replaced.
    #[must_use]
    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }
}

#[cfg(test)]
mod tests;
