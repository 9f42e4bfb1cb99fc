//! In-memory [`PersonRepository`] adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{PersonFilter, PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonId};

/// Directory store holding persons in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    persons: RwLock<Vec<Person>>,
}

impl InMemoryPersonRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn create(&self, person: &Person) -> Result<(), PersonRepositoryError> {
        let mut persons = self.persons.write().await;
        if persons.iter().any(|p| p.name() == person.name()) {
            return Err(PersonRepositoryError::duplicate_name(person.name().as_ref()));
        }
        if persons.iter().any(|p| p.id() == person.id()) {
            return Err(PersonRepositoryError::query(format!(
                "person {} already stored",
                person.id()
            )));
        }
        persons.push(person.clone());
        Ok(())
    }

    async fn update(&self, person: &Person) -> Result<(), PersonRepositoryError> {
        let mut persons = self.persons.write().await;
        if persons
            .iter()
            .any(|p| p.id() != person.id() && p.name() == person.name())
        {
            return Err(PersonRepositoryError::duplicate_name(person.name().as_ref()));
        }
        let slot = persons
            .iter_mut()
            .find(|p| p.id() == person.id())
            .ok_or_else(|| PersonRepositoryError::query(format!("no person {}", person.id())))?;
        *slot = person.clone();
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, PersonRepositoryError> {
        let persons = self.persons.read().await;
        Ok(persons.iter().find(|p| p.name().as_ref() == name).cloned())
    }

    async fn find_by_ids(&self, ids: &[PersonId]) -> Result<Vec<Person>, PersonRepositoryError> {
        let persons = self.persons.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| persons.iter().find(|p| p.id() == *id).cloned())
            .collect())
    }

    async fn list(&self, filter: PersonFilter) -> Result<Vec<Person>, PersonRepositoryError> {
        let persons = self.persons.read().await;
        Ok(persons.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn count(&self) -> Result<usize, PersonRepositoryError> {
        Ok(self.persons.read().await.len())
    }
}
