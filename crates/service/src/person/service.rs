use std::sync::Arc;

use tracing::{info, instrument};

use models::person::require_field;

use super::domain::{NewPerson, Person, PersonId, PersonPatch};
use super::repository::PersonRepository;
use crate::errors::ServiceError;

/// Person record store business rules, independent of web framework and backing.
#[derive(Clone)]
pub struct PersonService {
    repo: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self { Self { repo } }

    /// All persons in insertion order, or only those named `name` (case-insensitive, exact).
    ///
    /// # Examples
    /// ```
    /// use service::person::{repo::MemoryPersonRepository, PersonService};
    /// use std::sync::Arc;
    /// let svc = PersonService::new(Arc::new(MemoryPersonRepository::demo_seed()));
    /// let hits = tokio_test::block_on(svc.list(Some("ada lovelace"))).unwrap();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].name, "Ada Lovelace");
    /// ```
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        self.repo.list(name).await
    }

    pub async fn get(&self, id: PersonId) -> Result<Person, ServiceError> {
        self.repo.get(id).await?.ok_or(ServiceError::NotFound)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    /// Create a person. `name` is checked before `number`.
    ///
    /// # Examples
    /// ```
    /// use service::person::{repo::MemoryPersonRepository, NewPerson, PersonService};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = PersonService::new(Arc::new(MemoryPersonRepository::new()));
    /// let input = NewPerson { name: Some("New Person".into()), number: None };
    /// let err = tokio_test::block_on(svc.create(input)).unwrap_err();
    /// assert!(matches!(err, ServiceError::MissingField("number")));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewPerson) -> Result<Person, ServiceError> {
        let name = require_field("name", input.name.as_deref())?;
        let number = require_field("number", input.number.as_deref())?;
        let person = self.repo.insert(name, number).await?;
        info!(event = "person_created", id = %person.id, "person created");
        Ok(person)
    }

    /// Merge `patch` into the record. A missing id is `Ok(None)`, not an error.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>, ServiceError> {
        let updated = self.repo.update(id, patch.normalized()).await?;
        match &updated {
            Some(p) => info!(event = "person_updated", id = %p.id, "person updated"),
            None => info!(event = "person_update_missing", "update on unknown id ignored"),
        }
        Ok(updated)
    }

    /// Idempotent; returns whether something was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PersonId) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id).await?;
        info!(event = "person_deleted", removed, "person delete handled");
        Ok(removed)
    }
}
