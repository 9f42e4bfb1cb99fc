//! Translation of validation and store failures into caller-facing [`Error`]s.
//!
//! Validation failures become `invalid_request` with a `details` object of
//! the shape `{"invalidArgs": {...}, "field": "...", "code": "..."}`.
//! Store connectivity and query failures become `internal_error` and are
//! logged here, once, at `error` level.

use serde_json::{Map, Value, json};
use tracing::error;

use crate::domain::ports::{PersonRepositoryError, UserRepositoryError};
use crate::domain::{Error, LoginValidationError, PersonValidationError, UserValidationError};

/// Message returned for every failed login.
pub(crate) const WRONG_CREDENTIALS: &str = "wrong credentials";

/// Offending arguments echoed back to the caller.
///
/// Built from `(name, value)` pairs; `None` values are omitted.
pub(crate) fn invalid_args<'a, I>(args: I) -> Value
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let map: Map<String, Value> = args
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_owned(), Value::from(v))))
        .collect();
    Value::Object(map)
}

/// Build an `invalid_request` error tied to one argument.
pub(crate) fn invalid_argument(
    message: impl Into<String>,
    field: &str,
    code: &str,
    args: Value,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "invalidArgs": args,
        "field": field,
        "code": code,
    }))
}

pub(crate) fn person_validation(err: &PersonValidationError, args: Value) -> Error {
    invalid_argument(err.to_string(), err.field(), err.code(), args)
}

pub(crate) fn user_validation(err: &UserValidationError, args: Value) -> Error {
    invalid_argument(err.to_string(), err.field(), err.code(), args)
}

pub(crate) fn login_validation(err: &LoginValidationError, args: Value) -> Error {
    invalid_argument(err.to_string(), err.field(), err.code(), args)
}

/// Login failure; unknown user and wrong password are indistinguishable.
pub(crate) fn wrong_credentials(username: &str) -> Error {
    Error::invalid_request(WRONG_CREDENTIALS).with_details(json!({
        "invalidArgs": { "username": username },
        "code": "wrong_credentials",
    }))
}

pub(crate) fn map_person_repository_error(err: PersonRepositoryError, args: Value) -> Error {
    match err {
        PersonRepositoryError::DuplicateName { .. } => {
            invalid_argument(err.to_string(), "name", "duplicate_name", args)
        }
        PersonRepositoryError::Connection { .. } | PersonRepositoryError::Query { .. } => {
            error!(error = %err, "directory store failure");
            Error::internal(format!("directory store error: {err}"))
        }
    }
}

pub(crate) fn map_user_repository_error(err: UserRepositoryError, args: Value) -> Error {
    match err {
        UserRepositoryError::DuplicateUsername { .. } => {
            invalid_argument(err.to_string(), "username", "duplicate_username", args)
        }
        UserRepositoryError::Connection { .. } | UserRepositoryError::Query { .. } => {
            error!(error = %err, "identity store failure");
            Error::internal(format!("identity store error: {err}"))
        }
    }
}
