//! In-memory [`UserRepository`] adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId};

/// Identity store holding users in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username() == user.username()) {
            return Err(UserRepositoryError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        if users.iter().any(|u| u.id() == user.id()) {
            return Err(UserRepositoryError::query(format!(
                "user {} already stored",
                user.id()
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id() != user.id() && u.username() == user.username())
        {
            return Err(UserRepositoryError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| UserRepositoryError::query(format!("no user {}", user.id())))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username().as_ref() == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.users.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PersonId, Username};
    use rstest::{fixture, rstest};

    fn user(name: &str) -> User {
        User::new(UserId::random(), Username::new(name).expect("username"))
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_rejected(repo: InMemoryUserRepository) {
        repo.create(&user("alice")).await.expect("first insert");
        let err = repo.create(&user("alice")).await.expect_err("duplicate");
        assert_eq!(err, UserRepositoryError::duplicate_username("alice"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_persists_friends(repo: InMemoryUserRepository) {
        let mut alice = user("alice");
        repo.create(&alice).await.expect("insert");
        let friend = PersonId::random();
        alice.add_friend(friend);

        repo.update(&alice).await.expect("update");
        let stored = repo
            .find_by_id(alice.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.friends(), &[friend]);
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_by_username_are_exact(repo: InMemoryUserRepository) {
        repo.create(&user("alice")).await.expect("insert");
        assert!(repo.find_by_username("alice").await.expect("find").is_some());
        assert!(repo.find_by_username("Alice").await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_user_fails(repo: InMemoryUserRepository) {
        let err = repo.update(&user("ghost")).await.expect_err("missing");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
