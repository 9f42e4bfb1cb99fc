//! Driving port for read-only directory and identity operations.
//!
//! Lookup misses are `Ok(None)`, never errors.

use async_trait::async_trait;

use crate::domain::{Error, Person, RequestContext, UserProfile};

use super::PhonePresence;

/// Read operations over persons and users.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Number of persons in the directory.
    async fn person_count(&self, ctx: &RequestContext) -> Result<usize, Error>;

    /// Every person, optionally filtered by phone presence.
    async fn all_persons(
        &self,
        ctx: &RequestContext,
        phone: Option<PhonePresence>,
    ) -> Result<Vec<Person>, Error>;

    /// The person named exactly `name`.
    async fn find_person(&self, ctx: &RequestContext, name: &str) -> Result<Option<Person>, Error>;

    /// The authenticated caller, or `None` when anonymous.
    async fn me(&self, ctx: &RequestContext) -> Result<Option<UserProfile>, Error>;

    /// Every user with friends resolved. Requires an authenticated caller.
    async fn all_users(&self, ctx: &RequestContext) -> Result<Vec<UserProfile>, Error>;
}
