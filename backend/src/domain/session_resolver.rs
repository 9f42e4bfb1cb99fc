//! Stateless session resolution from bearer credentials.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::directory_errors::map_user_repository_error;
use crate::domain::ports::{CredentialCodec, PersonRepository, SessionResolver, UserRepository};
use crate::domain::profiles::resolve_profile;
use crate::domain::{Error, Session};

const BEARER_PREFIX: &str = "bearer ";

/// Extract the token from an `Authorization` value using the bearer scheme.
///
/// The scheme keyword is matched case-insensitively.
///
/// # Examples
/// ```
/// use contacts_backend::domain::bearer_token;
///
/// assert_eq!(bearer_token("BEARER abc"), Some("abc"));
/// assert_eq!(bearer_token("Basic abc"), None);
/// ```
pub fn bearer_token(header: &str) -> Option<&str> {
    let scheme = header.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = header.get(BEARER_PREFIX.len()..)?.trim();
    (!token.is_empty()).then_some(token)
}

/// [`SessionResolver`] verifying signed credentials and loading the caller.
#[derive(Clone)]
pub struct CredentialSessionResolver<U, P, C> {
    users: Arc<U>,
    persons: Arc<P>,
    codec: Arc<C>,
}

impl<U, P, C> CredentialSessionResolver<U, P, C> {
    /// Create a resolver over the identity and directory stores.
    pub fn new(users: Arc<U>, persons: Arc<P>, codec: Arc<C>) -> Self {
        Self {
            users,
            persons,
            codec,
        }
    }
}

#[async_trait]
impl<U, P, C> SessionResolver for CredentialSessionResolver<U, P, C>
where
    U: UserRepository,
    P: PersonRepository,
    C: CredentialCodec,
{
    async fn resolve(&self, authorization: Option<&str>) -> Result<Session, Error> {
        let Some(header) = authorization else {
            return Ok(Session::Anonymous);
        };
        let Some(token) = bearer_token(header) else {
            debug!("authorization header without bearer token; treating as anonymous");
            return Ok(Session::Anonymous);
        };
        let claims = match self.codec.verify(token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(error = %err, "credential rejected; treating as anonymous");
                return Ok(Session::Anonymous);
            }
        };

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await
            .map_err(|err| map_user_repository_error(err, serde_json::Value::Null))?;
        let Some(user) = user else {
            debug!(user_id = %claims.user_id(), "credential names unknown user; treating as anonymous");
            return Ok(Session::Anonymous);
        };

        let profile = resolve_profile(self.persons.as_ref(), user).await?;
        Ok(Session::Authenticated(profile))
    }
}
