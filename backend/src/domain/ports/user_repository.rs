//! Port for the identity store holding [`User`] records.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by identity store adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "identity store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "identity store query failed: {message}",
        /// Another user already holds this username.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

/// Identity store.
///
/// Username uniqueness is enforced by the adapter at write time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Replace the stored record with the same id, including its friends.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Every user, in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;
}
