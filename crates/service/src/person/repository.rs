use async_trait::async_trait;

use super::domain::{Person, PersonId, PersonPatch};
use crate::errors::ServiceError;

/// Storage contract for person records.
///
/// Implementations own the collection and return detached copies. `insert`
/// and `update` must enforce case-insensitive name uniqueness themselves so
/// the check and the write cannot interleave with another request.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All persons in insertion order, optionally only those whose name
    /// equals `name` ignoring case.
    async fn list(&self, name: Option<&str>) -> Result<Vec<Person>, ServiceError>;
    async fn get(&self, id: PersonId) -> Result<Option<Person>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    /// Fields are already validated non-empty; the store assigns the id.
    async fn insert(&self, name: String, number: String) -> Result<Person, ServiceError>;
    /// `Ok(None)` when no record has `id`.
    async fn update(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: PersonId) -> Result<bool, ServiceError>;
}
