//! Credential configuration parsing and validation.
//!
//! The token signing secret and credential lifetime come from the
//! environment and are validated per [`BuildMode`]: debug builds tolerate
//! missing or malformed values with warnings, release builds reject them.

pub mod fingerprint;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

use self::fingerprint::secret_fingerprint;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 32;
const DEFAULT_TTL_SECONDS: u64 = 86_400;
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const TTL_ENV: &str = "TOKEN_TTL_SECONDS";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for credential configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require a real secret and valid values.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contacts_backend::outbound::credentials::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated credential settings.
pub struct CredentialSettings {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
    ephemeral: bool,
}

impl CredentialSettings {
    /// Settings from an explicit secret and lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
            ephemeral: false,
        }
    }

    /// HMAC signing secret.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }

    /// Lifetime of issued credentials.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Loggable fingerprint of the secret.
    pub fn fingerprint(&self) -> String {
        secret_fingerprint(self.secret())
    }
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Errors raised while validating credential configuration.
#[derive(thiserror::Error, Debug)]
pub enum CredentialConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build credential settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use contacts_backend::outbound::credentials::{credential_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b'a'; 32])?;
///
/// let secret_path = secret_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///     "TOKEN_TTL_SECONDS" => Some("3600".to_string()),
///     _ => None,
/// });
///
/// let settings = credential_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl().as_secs(), 3600);
/// assert!(!settings.is_ephemeral());
/// # Ok(())
/// # }
/// ```
pub fn credential_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<CredentialSettings, CredentialConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let ttl = ttl_from_env(env, mode)?;
    let (secret, ephemeral) = secret_from_env(env, mode, allow_ephemeral)?;

    Ok(CredentialSettings {
        secret,
        ttl,
        ephemeral,
    })
}

fn allow_ephemeral_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<bool, CredentialConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(CredentialConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(
                value = %value,
                "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"
            );
            Ok(false)
        }
        None => Err(CredentialConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, CredentialConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(Duration::from_secs(DEFAULT_TTL_SECONDS));
    };
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_TTL_SECONDS; using default");
            Ok(Duration::from_secs(DEFAULT_TTL_SECONDS))
        }
        _ => Err(CredentialConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<(Zeroizing<Vec<u8>>, bool), CredentialConfigError> {
    let secret_path = env
        .string(SECRET_FILE_ENV)
        .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_string());
    let path = PathBuf::from(secret_path);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < TOKEN_SECRET_MIN_LEN {
                if mode == BuildMode::Release {
                    bytes.zeroize();
                    return Err(CredentialConfigError::SecretTooShort {
                        path,
                        length,
                        min_len: TOKEN_SECRET_MIN_LEN,
                    });
                }
                warn!(
                    path = %path.display(),
                    length,
                    "token secret shorter than recommended (dev only)"
                );
            }
            Ok((Zeroizing::new(bytes), false))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok((ephemeral_secret(), true))
            } else {
                Err(CredentialConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(secret.as_mut_slice());
    secret
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
