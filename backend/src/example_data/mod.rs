//! Startup seeding of the sample directory entries.

mod startup;

pub use startup::{SEED_PERSONS, SeedOutcome, StartupSeedingError, seed_example_data_on_startup};
