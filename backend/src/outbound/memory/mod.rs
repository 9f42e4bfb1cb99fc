//! In-memory directory and identity stores.
//!
//! Records live in insertion order behind a Tokio `RwLock`. Uniqueness of
//! names and usernames is checked under the write lock, so a write is
//! accepted or rejected atomically with respect to concurrent writers.

mod person_repository;
mod user_repository;

pub use person_repository::InMemoryPersonRepository;
pub use user_repository::InMemoryUserRepository;
