//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialCodec`]) describe what the
//! domain needs from adapters. Driving ports ([`SessionResolver`],
//! [`DirectoryQuery`], [`DirectoryCommand`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_codec;
mod directory_command;
mod directory_query;
mod person_repository;
mod session_resolver;
mod user_repository;

#[cfg(test)]
pub use credential_codec::MockCredentialCodec;
pub use credential_codec::{CredentialCodec, CredentialCodecError};
pub use directory_command::{AddPersonRequest, DirectoryCommand};
pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{
    PersonFilter, PersonRepository, PersonRepositoryError, PhonePresence,
};
pub use session_resolver::SessionResolver;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
