//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CredentialCodec, DirectoryCommand, DirectoryQuery, PersonRepository, SessionResolver,
    UserRepository,
};
use crate::domain::{CredentialSessionResolver, DirectoryCommandService, DirectoryQueryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn SessionResolver>,
    pub queries: Arc<dyn DirectoryQuery>,
    pub commands: Arc<dyn DirectoryCommand>,
}

impl HttpState {
    /// Construct state from the driving ports.
    pub fn new(
        sessions: Arc<dyn SessionResolver>,
        queries: Arc<dyn DirectoryQuery>,
        commands: Arc<dyn DirectoryCommand>,
    ) -> Self {
        Self {
            sessions,
            queries,
            commands,
        }
    }

    /// Wire the domain services over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use contacts_backend::inbound::http::state::HttpState;
    /// use contacts_backend::outbound::credentials::{CredentialSettings, JwtCredentialCodec};
    /// use contacts_backend::outbound::memory::{InMemoryPersonRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let settings = CredentialSettings::new(vec![b'k'; 32], Duration::from_secs(60));
    /// let state = HttpState::from_adapters(
    ///     Arc::new(InMemoryPersonRepository::new()),
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(JwtCredentialCodec::new(&settings, Arc::new(DefaultClock))),
    /// );
    /// let _queries = state.queries.clone();
    /// ```
    pub fn from_adapters<P, U, C>(persons: Arc<P>, users: Arc<U>, codec: Arc<C>) -> Self
    where
        P: PersonRepository + 'static,
        U: UserRepository + 'static,
        C: CredentialCodec + 'static,
    {
        Self {
            sessions: Arc::new(CredentialSessionResolver::new(
                users.clone(),
                persons.clone(),
                codec.clone(),
            )),
            queries: Arc::new(DirectoryQueryService::new(persons.clone(), users.clone())),
            commands: Arc::new(DirectoryCommandService::new(persons, users, codec)),
        }
    }
}
