//! Identity records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Person, PersonId};

/// Validation errors returned by [`User`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    UsernameTooShort { min: usize },
}

impl UserValidationError {
    /// Argument the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyUsername | Self::UsernameTooShort { .. } => "username",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::InvalidId => "invalid_id",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooShort { .. } => "username_too_short",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        Ok(Self(username))
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

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user with an ordered friends list.
///
/// ## Invariants
/// - `username` is unique across users (enforced by the store).
/// - `friends` holds each [`PersonId`] at most once when mutated through
///   [`User::add_friend`]. The user does not own the referenced persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    friends: Vec<PersonId>,
}

impl User {
    /// Build a user with no friends.
    pub fn new(id: UserId, username: Username) -> Self {
        Self {
            id,
            username,
            friends: Vec::new(),
        }
    }

    /// Build a user with an existing friends list, as loaded from a store.
    pub fn with_friends(id: UserId, username: Username, friends: Vec<PersonId>) -> Self {
        Self {
            id,
            username,
            friends,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Friend references in insertion order.
    pub fn friends(&self) -> &[PersonId] {
        &self.friends
    }

    /// Whether `person` is already a friend, compared by identity.
    pub fn has_friend(&self, person: PersonId) -> bool {
        self.friends.contains(&person)
    }

    /// Append `person` unless already present. Returns whether it appended.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::domain::{PersonId, User, UserId, Username};
    ///
    /// let mut user = User::new(UserId::random(), Username::new("alice").expect("username"));
    /// let friend = PersonId::random();
    /// assert!(user.add_friend(friend));
    /// assert!(!user.add_friend(friend));
    /// assert_eq!(user.friends(), &[friend]);
    /// ```
    pub fn add_friend(&mut self, person: PersonId) -> bool {
        if self.has_friend(person) {
            return false;
        }
        self.friends.push(person);
        true
    }
}

/// A user together with its friends resolved into directory entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user: User,
    friends: Vec<Person>,
}

impl UserProfile {
    /// Pair a user with its resolved friends.
    pub fn new(user: User, friends: Vec<Person>) -> Self {
        Self { user, friends }
    }

    /// The underlying user record.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Resolved friends in the user's order; dangling references are absent.
    pub fn friends(&self) -> &[Person] {
        &self.friends
    }
}
