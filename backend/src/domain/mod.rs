//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: Define the contact directory and identity model independently of
//! transport and storage. Keep types immutable where possible and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: caller-facing failure payload and category.
//! - Person and its newtypes: directory entries with a derived address.
//! - User / UserProfile: identities with an ordered friends list.
//! - Session / RequestContext: per-request identity passed to every operation.
//! - Services implementing the driving ports in [`ports`].

pub mod auth;
pub(crate) mod directory_errors;
pub mod directory_command_service;
pub mod directory_query_service;
pub mod error;
pub mod person;
pub mod ports;
mod profiles;
pub mod session;
pub mod session_resolver;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    Credential, CredentialClaims, LoginCredentials, LoginValidationError, SHARED_PASSWORD,
};
pub use self::directory_command_service::DirectoryCommandService;
pub use self::directory_query_service::DirectoryQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::person::{
    Address, City, PERSON_NAME_MIN, PHONE_NUMBER_MIN, Person, PersonDraft, PersonId, PersonName,
    PersonValidationError, PhoneNumber, Street,
};
pub use self::session::{RequestContext, Session};
pub use self::session_resolver::{CredentialSessionResolver, bearer_token};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MIN, User, UserId, UserProfile, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use contacts_backend::domain::{ApiResult, Error};
///
/// fn operation() -> ApiResult<()> {
///     Err(Error::unauthorized("not authenticated"))
/// }
/// assert!(operation().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
