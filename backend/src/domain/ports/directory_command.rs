//! Driving port for directory and identity mutations.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Credential, Error, LoginCredentials, Person, RequestContext, User, UserProfile};

/// Raw arguments for creating a person; validated by the command service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddPersonRequest {
    /// Unique name, at least four characters.
    pub name: String,
    /// Optional phone, at least five characters when present.
    pub phone: Option<String>,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
}

/// Write operations over persons and users.
#[async_trait]
pub trait DirectoryCommand: Send + Sync {
    /// Create a person and add it to the caller's friends. Requires login.
    async fn add_person(&self, ctx: &RequestContext, request: AddPersonRequest)
    -> Result<Person, Error>;

    /// Set the phone of the person named `name`; `None` when no such person.
    async fn edit_number(
        &self,
        ctx: &RequestContext,
        name: &str,
        phone: &str,
    ) -> Result<Option<Person>, Error>;

    /// Create a user with an empty friends list.
    async fn create_user(&self, ctx: &RequestContext, username: &str) -> Result<User, Error>;

    /// Check credentials and issue a signed credential.
    async fn login(
        &self,
        ctx: &RequestContext,
        credentials: &LoginCredentials,
    ) -> Result<Credential, Error>;

    /// Add the person named `name` to the caller's friends. Requires login.
    async fn add_as_friend(&self, ctx: &RequestContext, name: &str) -> Result<UserProfile, Error>;
}
