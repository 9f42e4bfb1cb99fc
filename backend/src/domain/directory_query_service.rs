//! Read-only directory operations.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::directory_errors::{map_person_repository_error, map_user_repository_error};
use crate::domain::ports::{
    DirectoryQuery, PersonFilter, PersonRepository, PhonePresence, UserRepository,
};
use crate::domain::profiles::resolve_profile;
use crate::domain::{Error, Person, RequestContext, UserProfile};

/// [`DirectoryQuery`] backed by the directory and identity stores.
#[derive(Clone)]
pub struct DirectoryQueryService<P, U> {
    persons: Arc<P>,
    users: Arc<U>,
}

impl<P, U> DirectoryQueryService<P, U> {
    /// Create a new service with the given repositories.
    pub fn new(persons: Arc<P>, users: Arc<U>) -> Self {
        Self { persons, users }
    }
}

#[async_trait]
impl<P, U> DirectoryQuery for DirectoryQueryService<P, U>
where
    P: PersonRepository,
    U: UserRepository,
{
    async fn person_count(&self, _ctx: &RequestContext) -> Result<usize, Error> {
        self.persons
            .count()
            .await
            .map_err(|err| map_person_repository_error(err, Value::Null))
    }

    async fn all_persons(
        &self,
        _ctx: &RequestContext,
        phone: Option<PhonePresence>,
    ) -> Result<Vec<Person>, Error> {
        self.persons
            .list(PersonFilter::from(phone))
            .await
            .map_err(|err| map_person_repository_error(err, Value::Null))
    }

    async fn find_person(&self, _ctx: &RequestContext, name: &str) -> Result<Option<Person>, Error> {
        self.persons
            .find_by_name(name)
            .await
            .map_err(|err| map_person_repository_error(err, Value::Null))
    }

    async fn me(&self, ctx: &RequestContext) -> Result<Option<UserProfile>, Error> {
        Ok(ctx.session().current_user().cloned())
    }

    async fn all_users(&self, ctx: &RequestContext) -> Result<Vec<UserProfile>, Error> {
        ctx.session().require_user()?;
        let users = self
            .users
            .list()
            .await
            .map_err(|err| map_user_repository_error(err, Value::Null))?;

        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(resolve_profile(self.persons.as_ref(), user).await?);
        }
        Ok(profiles)
    }
}
