//! Port for issuing and verifying signed bearer credentials.

use crate::domain::{Credential, CredentialClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential codecs.
    pub enum CredentialCodecError {
        /// Signing failed.
        Encode { message: String } => "credential encoding failed: {message}",
        /// The token is malformed, expired, or its signature does not verify.
        Rejected { message: String } => "credential rejected: {message}",
    }
}

/// Signs claims into a [`Credential`] and verifies presented tokens.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialCodec: Send + Sync {
    /// Sign `claims` into a token.
    fn issue(&self, claims: &CredentialClaims) -> Result<Credential, CredentialCodecError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<CredentialClaims, CredentialCodecError>;
}
