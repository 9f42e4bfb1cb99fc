//! Directory and identity mutations.
//!
//! Writes rely on the stores' uniqueness enforcement instead of pre-checks.
//! `add_person` performs two independent writes; if the friends update fails
//! after the person was stored, the person remains and the caller receives
//! an internal error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::directory_errors::{
    invalid_args, invalid_argument, map_person_repository_error, map_user_repository_error,
    person_validation, user_validation, wrong_credentials,
};
use crate::domain::ports::{
    AddPersonRequest, CredentialCodec, DirectoryCommand, PersonRepository, UserRepository,
};
use crate::domain::{
    Credential, CredentialClaims, Error, LoginCredentials, Person, PersonDraft, PersonId,
    PhoneNumber, RequestContext, User, UserId, UserProfile, Username,
};

/// [`DirectoryCommand`] backed by the stores and a credential codec.
#[derive(Clone)]
pub struct DirectoryCommandService<P, U, C> {
    persons: Arc<P>,
    users: Arc<U>,
    codec: Arc<C>,
}

impl<P, U, C> DirectoryCommandService<P, U, C> {
    /// Create a new service with the given repositories and codec.
    pub fn new(persons: Arc<P>, users: Arc<U>, codec: Arc<C>) -> Self {
        Self {
            persons,
            users,
            codec,
        }
    }
}

#[async_trait]
impl<P, U, C> DirectoryCommand for DirectoryCommandService<P, U, C>
where
    P: PersonRepository,
    U: UserRepository,
    C: CredentialCodec,
{
    async fn add_person(
        &self,
        ctx: &RequestContext,
        request: AddPersonRequest,
    ) -> Result<Person, Error> {
        let caller = ctx.session().require_user()?;
        let args = invalid_args([
            ("name", Some(request.name.as_str())),
            ("phone", request.phone.as_deref()),
            ("street", Some(request.street.as_str())),
            ("city", Some(request.city.as_str())),
        ]);

        let draft = PersonDraft::try_from_parts(
            &request.name,
            request.phone.as_deref(),
            &request.street,
            &request.city,
        )
        .map_err(|err| person_validation(&err, args.clone()))?;
        let person = Person::from_draft(PersonId::random(), draft);
        self.persons
            .create(&person)
            .await
            .map_err(|err| map_person_repository_error(err, args))?;

        let mut user = caller.user().clone();
        if user.add_friend(person.id()) {
            if let Err(err) = self.users.update(&user).await {
                warn!(
                    person = %person.name(),
                    user = %user.username(),
                    error = %err,
                    "person stored but friends update failed"
                );
                return Err(Error::internal(format!(
                    "person created but friends update failed: {err}"
                )));
            }
        }

        info!(person = %person.name(), user = %user.username(), "person added");
        Ok(person)
    }

    async fn edit_number(
        &self,
        _ctx: &RequestContext,
        name: &str,
        phone: &str,
    ) -> Result<Option<Person>, Error> {
        let args = invalid_args([("name", Some(name)), ("phone", Some(phone))]);
        let Some(person) = self
            .persons
            .find_by_name(name)
            .await
            .map_err(|err| map_person_repository_error(err, Value::Null))?
        else {
            return Ok(None);
        };

        let phone = PhoneNumber::new(phone).map_err(|err| person_validation(&err, args.clone()))?;
        let updated = person.with_phone(phone);
        self.persons
            .update(&updated)
            .await
            .map_err(|err| map_person_repository_error(err, args))?;
        Ok(Some(updated))
    }

    async fn create_user(&self, _ctx: &RequestContext, username: &str) -> Result<User, Error> {
        let args = invalid_args([("username", Some(username))]);
        let username = Username::new(username).map_err(|err| user_validation(&err, args.clone()))?;
        let user = User::new(UserId::random(), username);
        self.users
            .create(&user)
            .await
            .map_err(|err| map_user_repository_error(err, args))?;
        info!(user = %user.username(), "user created");
        Ok(user)
    }

    async fn login(
        &self,
        _ctx: &RequestContext,
        credentials: &LoginCredentials,
    ) -> Result<Credential, Error> {
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(|err| map_user_repository_error(err, Value::Null))?;
        let user = match found {
            Some(user) if credentials.password_matches() => user,
            _ => return Err(wrong_credentials(credentials.username())),
        };

        let claims = CredentialClaims::new(user.username().clone(), user.id().clone());
        self.codec.issue(&claims).map_err(|err| {
            error!(error = %err, "failed to issue credential");
            Error::internal(format!("failed to issue credential: {err}"))
        })
    }

    async fn add_as_friend(&self, ctx: &RequestContext, name: &str) -> Result<UserProfile, Error> {
        let caller = ctx.session().require_user()?;
        let args = invalid_args([("name", Some(name))]);
        let Some(person) = self
            .persons
            .find_by_name(name)
            .await
            .map_err(|err| map_person_repository_error(err, Value::Null))?
        else {
            return Err(invalid_argument(
                format!("no person named {name}"),
                "name",
                "person_not_found",
                args,
            ));
        };

        let mut user = caller.user().clone();
        let mut friends = caller.friends().to_vec();
        if user.add_friend(person.id()) {
            self.users
                .update(&user)
                .await
                .map_err(|err| map_user_repository_error(err, args))?;
            friends.push(person);
        }
        Ok(UserProfile::new(user, friends))
    }
}

#[cfg(test)]
#[path = "directory_command_service_tests.rs"]
mod tests;
