//! Login inputs and the signed credential issued in exchange.
//!
//! Passwords are not stored per user yet: every account accepts the shared
//! development password [`SHARED_PASSWORD`]. Replace the check in
//! [`LoginCredentials::password_matches`] with a per-user hash before any
//! production use.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserId, Username};

/// Password accepted for every account until per-user credentials exist.
pub const SHARED_PASSWORD: &str = "secret";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Argument the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is kept exactly as supplied and is not blank.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use contacts_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "secret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert!(creds.password_matches());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Whether the supplied password passes the shared-password check.
    pub fn password_matches(&self) -> bool {
        self.password.as_str() == SHARED_PASSWORD
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity asserted by a signed credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialClaims {
    username: Username,
    user_id: UserId,
}

impl CredentialClaims {
    /// Claims for the given account.
    pub fn new(username: Username, user_id: UserId) -> Self {
        Self { username, user_id }
    }

    /// Asserted username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Asserted user id; the session resolver looks the user up by this.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Opaque signed token returned by login and presented as a bearer value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
