//! Unit tests for credential configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempSecretFile {
    path: PathBuf,
}

impl TempSecretFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("token-secret-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for TempSecretFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn missing_path() -> String {
    std::env::temp_dir()
        .join(format!("missing-secret-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

fn expect_error(
    result: Result<CredentialSettings, CredentialConfigError>,
    label: &str,
) -> CredentialConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn release_reads_secret_and_defaults_ttl() {
    let secret = TempSecretFile::new(TOKEN_SECRET_MIN_LEN).expect("secret file");
    let env = mock_env(HashMap::from([(SECRET_FILE_ENV, secret.path_str().to_owned())]));

    let settings = credential_settings_from_env(&env, BuildMode::Release).expect("settings");
    assert_eq!(settings.secret(), vec![b'a'; TOKEN_SECRET_MIN_LEN].as_slice());
    assert_eq!(settings.ttl(), Duration::from_secs(DEFAULT_TTL_SECONDS));
    assert!(!settings.is_ephemeral());
    assert_eq!(settings.fingerprint(), secret_fingerprint(&[b'a'; 32]));
}

#[rstest]
fn release_short_secret_is_rejected() {
    let secret = TempSecretFile::new(16).expect("secret file");
    let env = mock_env(HashMap::from([(SECRET_FILE_ENV, secret.path_str().to_owned())]));

    let err = expect_error(
        credential_settings_from_env(&env, BuildMode::Release),
        "expected short secret to fail",
    );
    assert!(matches!(
        err,
        CredentialConfigError::SecretTooShort { length: 16, .. }
    ));
}

#[rstest]
fn release_missing_secret_is_rejected() {
    let env = mock_env(HashMap::from([(SECRET_FILE_ENV, missing_path())]));

    let err = expect_error(
        credential_settings_from_env(&env, BuildMode::Release),
        "expected missing secret to fail",
    );
    assert!(matches!(err, CredentialConfigError::SecretRead { .. }));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected() {
    let secret = TempSecretFile::new(TOKEN_SECRET_MIN_LEN).expect("secret file");
    let env = mock_env(HashMap::from([
        (SECRET_FILE_ENV, secret.path_str().to_owned()),
        (ALLOW_EPHEMERAL_ENV, "1".to_owned()),
    ]));

    let err = expect_error(
        credential_settings_from_env(&env, BuildMode::Release),
        "expected ephemeral to be rejected in release",
    );
    assert!(matches!(err, CredentialConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case("0")]
#[case("-5")]
#[case("soon")]
fn release_invalid_ttl_is_rejected(#[case] value: &str) {
    let secret = TempSecretFile::new(TOKEN_SECRET_MIN_LEN).expect("secret file");
    let env = mock_env(HashMap::from([
        (SECRET_FILE_ENV, secret.path_str().to_owned()),
        (TTL_ENV, value.to_owned()),
    ]));

    let err = expect_error(
        credential_settings_from_env(&env, BuildMode::Release),
        "expected invalid ttl to fail",
    );
    assert!(matches!(
        err,
        CredentialConfigError::InvalidEnv { name: TTL_ENV, .. }
    ));
}

#[rstest]
fn debug_missing_secret_falls_back_to_ephemeral() {
    let env = mock_env(HashMap::from([
        (SECRET_FILE_ENV, missing_path()),
        (TTL_ENV, "bogus".to_owned()),
    ]));

    let settings = credential_settings_from_env(&env, BuildMode::Debug).expect("settings");
    assert!(settings.is_ephemeral());
    assert_eq!(settings.secret().len(), EPHEMERAL_SECRET_LEN);
    assert_eq!(settings.ttl(), Duration::from_secs(DEFAULT_TTL_SECONDS));
}

#[rstest]
fn debug_output_redacts_secret() {
    let settings = CredentialSettings::new(b"super-secret-value".to_vec(), Duration::from_secs(60));
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("super-secret-value"));
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case("n", Some(false))]
#[case("maybe", None)]
fn parse_bool_accepts_common_spellings(#[case] value: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(value), expected);
}
