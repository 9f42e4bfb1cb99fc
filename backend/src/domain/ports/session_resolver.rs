//! Driving port turning request credentials into a [`Session`].

use async_trait::async_trait;

use crate::domain::{Error, Session};

/// Resolves the identity of one request.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve the raw `Authorization` header value, if any, into a session.
    ///
    /// Missing, malformed, and unverifiable credentials all yield
    /// [`Session::Anonymous`]; only store failures are errors.
    async fn resolve(&self, authorization: Option<&str>) -> Result<Session, Error>;
}
