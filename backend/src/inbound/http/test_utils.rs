//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::DefaultClock;

use crate::domain::ports::SessionResolver;
use crate::domain::{Error, Session, User, UserId, UserProfile, Username};
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::{CredentialSettings, JwtCredentialCodec};
use crate::outbound::memory::{InMemoryPersonRepository, InMemoryUserRepository};

/// Resolver that authenticates `alice` for one exact header value.
pub struct FixedSessionResolver {
    expected: String,
    profile: UserProfile,
}

#[async_trait]
impl SessionResolver for FixedSessionResolver {
    async fn resolve(&self, authorization: Option<&str>) -> Result<Session, Error> {
        Ok(match authorization {
            Some(header) if header == self.expected => {
                Session::Authenticated(self.profile.clone())
            }
            _ => Session::Anonymous,
        })
    }
}

/// Resolver yielding `alice` when the header equals `expected_header`.
pub fn alice_session(expected_header: &str) -> FixedSessionResolver {
    let username = Username::new("alice").expect("valid username");
    FixedSessionResolver {
        expected: expected_header.to_owned(),
        profile: UserProfile::new(User::new(UserId::random(), username), Vec::new()),
    }
}

/// Settings with a fixed test secret.
pub fn test_credential_settings() -> CredentialSettings {
    CredentialSettings::new(vec![b'k'; 32], Duration::from_secs(3600))
}

/// State over fresh in-memory stores with the real session resolver.
pub fn in_memory_state() -> HttpState {
    let codec = JwtCredentialCodec::new(&test_credential_settings(), Arc::new(DefaultClock));
    HttpState::from_adapters(
        Arc::new(InMemoryPersonRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(codec),
    )
}

/// In-memory state with the session resolver replaced.
pub fn state_with_sessions(sessions: Arc<dyn SessionResolver>) -> HttpState {
    HttpState {
        sessions,
        ..in_memory_state()
    }
}
