//! Friend resolution shared by the session resolver and query service.

use serde_json::Value;

use crate::domain::directory_errors::map_person_repository_error;
use crate::domain::ports::PersonRepository;
use crate::domain::{Error, User, UserProfile};

/// Load `user`'s friends in order, skipping references with no record.
pub(crate) async fn resolve_profile<P>(persons: &P, user: User) -> Result<UserProfile, Error>
where
    P: PersonRepository + ?Sized,
{
    let friends = persons
        .find_by_ids(user.friends())
        .await
        .map_err(|err| map_person_repository_error(err, Value::Null))?;
    Ok(UserProfile::new(user, friends))
}
