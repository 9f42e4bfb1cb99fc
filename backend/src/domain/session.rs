//! Per-request identity.
//!
//! A [`Session`] is resolved fresh for every request from its bearer
//! credential and never stored server-side. Operations receive it inside a
//! [`RequestContext`] passed explicitly as their first argument.

use super::{Error, UserProfile};

/// Identity attached to one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// No credential, or one that failed verification.
    #[default]
    Anonymous,
    /// Verified caller with friends resolved.
    Authenticated(UserProfile),
}

impl Session {
    /// The authenticated caller, if any.
    pub fn current_user(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(profile) => Some(profile),
        }
    }

    /// The authenticated caller, or an [`ErrorCode::Unauthorized`] error.
    ///
    /// [`ErrorCode::Unauthorized`]: super::ErrorCode::Unauthorized
    pub fn require_user(&self) -> Result<&UserProfile, Error> {
        self.current_user()
            .ok_or_else(|| Error::unauthorized("not authenticated"))
    }
}

/// Explicit per-request context threaded into every operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    session: Session,
}

impl RequestContext {
    /// Context for a resolved session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Context with no authenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The request's session.
    pub fn session(&self) -> &Session {
        &self.session
    }
}
