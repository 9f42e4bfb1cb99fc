//! Startup seeding orchestration.
//!
//! Seeds go through [`PersonRepository::create`], so the uniqueness rule
//! applies: a seed whose name is already taken is skipped and logged.

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonDraft, PersonId, PersonValidationError};

/// Sample contacts as `(name, phone, street, city)`.
pub const SEED_PERSONS: [(&str, Option<&str>, &str, &str); 3] = [
    ("Midu", Some("034-1234568"), "Calle Frontend", "Barcelona"),
    ("Youseff", Some("044-434343"), "Avenida Fullstack", "Mataro"),
    ("Itzi", None, "Pasaje Testing", "Ibiza"),
];

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// A seed entry failed validation.
    #[error("invalid seed {name}: {source}")]
    InvalidSeed {
        /// Name of the offending seed.
        name: String,
        /// Underlying validation error.
        #[source]
        source: PersonValidationError,
    },
    /// The directory store failed.
    #[error("example data seeding error: {0}")]
    Store(#[from] PersonRepositoryError),
}

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

/// Apply example data on startup when enabled.
///
/// Returns `Ok(None)` when seeding is disabled.
///
/// # Examples
///
/// ```
/// use contacts_backend::example_data::seed_example_data_on_startup;
/// use contacts_backend::outbound::memory::InMemoryPersonRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let persons = InMemoryPersonRepository::new();
/// let outcome = seed_example_data_on_startup(true, &persons)
///     .await
///     .expect("seeding succeeds");
/// assert_eq!(outcome.map(|o| o.inserted), Some(3));
/// # });
/// ```
pub async fn seed_example_data_on_startup<P>(
    enabled: bool,
    persons: &P,
) -> Result<Option<SeedOutcome>, StartupSeedingError>
where
    P: PersonRepository + ?Sized,
{
    if !enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let mut outcome = SeedOutcome::default();
    for (name, phone, street, city) in SEED_PERSONS {
        let draft = PersonDraft::try_from_parts(name, phone, street, city).map_err(|source| {
            StartupSeedingError::InvalidSeed {
                name: name.to_owned(),
                source,
            }
        })?;
        match persons.create(&Person::from_draft(PersonId::random(), draft)).await {
            Ok(()) => outcome.inserted += 1,
            Err(PersonRepositoryError::DuplicateName { .. }) => {
                warn!(person = name, "example person already present; skipping");
                outcome.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        "example data seeding applied"
    );
    Ok(Some(outcome))
}
