//! HS256 JSON Web Token implementation of [`CredentialCodec`].

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CredentialCodec, CredentialCodecError};
use crate::domain::{Credential, CredentialClaims, UserId, Username};

use super::CredentialSettings;

/// Registered and private claims carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    /// Subject: the user id.
    sub: String,
    username: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies credentials with a process-wide HMAC secret.
pub struct JwtCredentialCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtCredentialCodec {
    /// Build a codec from validated settings.
    pub fn new(settings: &CredentialSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret()),
            decoding: DecodingKey::from_secret(settings.secret()),
            ttl: settings.ttl(),
            clock,
        }
    }
}

impl CredentialCodec for JwtCredentialCodec {
    fn issue(&self, claims: &CredentialClaims) -> Result<Credential, CredentialCodecError> {
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| CredentialCodecError::encode("credential lifetime out of range"))?;
        let now = self.clock.utc().timestamp();
        let token_claims = TokenClaims {
            sub: claims.user_id().to_string(),
            username: claims.username().to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::default(), &token_claims, &self.encoding)
            .map(Credential::new)
            .map_err(|err| CredentialCodecError::encode(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<CredentialClaims, CredentialCodecError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &Validation::default())
            .map_err(|err| CredentialCodecError::rejected(err.to_string()))?;
        let TokenClaims { sub, username, .. } = data.claims;

        let user_id =
            UserId::new(sub).map_err(|err| CredentialCodecError::rejected(err.to_string()))?;
        let username =
            Username::new(username).map_err(|err| CredentialCodecError::rejected(err.to_string()))?;
        Ok(CredentialClaims::new(username, user_id))
    }
}
