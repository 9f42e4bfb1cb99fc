//! Signed bearer credentials.
//!
//! - `config`: environment-driven secret and lifetime settings.
//! - `jwt_codec`: HS256 JSON Web Token implementation of `CredentialCodec`.

pub mod config;
mod jwt_codec;

pub use config::{BuildMode, CredentialConfigError, CredentialSettings, credential_settings_from_env};
pub use jwt_codec::JwtCredentialCodec;
