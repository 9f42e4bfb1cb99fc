//! Port for the directory store holding [`Person`] records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Person, PersonId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory store adapters.
    pub enum PersonRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "directory store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "directory store query failed: {message}",
        /// Another person already uses this name.
        DuplicateName { name: String } => "a person named {name} already exists",
    }
}

/// Whether a listing keeps persons with or without a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhonePresence {
    /// Only persons with a phone number.
    Present,
    /// Only persons without a phone number.
    Absent,
}

/// Predicate applied by [`PersonRepository::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonFilter {
    /// Every person.
    #[default]
    All,
    /// Persons whose phone presence matches.
    Phone(PhonePresence),
}

impl PersonFilter {
    /// Whether `person` passes this filter.
    pub fn matches(self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::Phone(PhonePresence::Present) => person.phone().is_some(),
            Self::Phone(PhonePresence::Absent) => person.phone().is_none(),
        }
    }
}

impl From<Option<PhonePresence>> for PersonFilter {
    fn from(value: Option<PhonePresence>) -> Self {
        value.map_or(Self::All, Self::Phone)
    }
}

/// Directory store.
///
/// Adapters must reject a write whose name collides with another record
/// atomically with the write itself; callers do not pre-check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a new person.
    async fn create(&self, person: &Person) -> Result<(), PersonRepositoryError>;

    /// Replace the stored record with the same id.
    async fn update(&self, person: &Person) -> Result<(), PersonRepositoryError>;

    /// Find the person whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, PersonRepositoryError>;

    /// Load persons by id in the order given, skipping ids with no record.
    async fn find_by_ids(&self, ids: &[PersonId]) -> Result<Vec<Person>, PersonRepositoryError>;

    /// List persons passing `filter`, in insertion order.
    async fn list(&self, filter: PersonFilter) -> Result<Vec<Person>, PersonRepositoryError>;

    /// Number of stored persons.
    async fn count(&self) -> Result<usize, PersonRepositoryError>;
}
