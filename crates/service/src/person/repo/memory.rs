//! In-memory person store.
//!
//! A `Vec` keeps insertion order; ids come from a monotonic counter. Every
//! mutation runs under a single write guard, which makes the uniqueness check
//! and the write atomic with respect to other requests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::person::{name_key, same_name};

use crate::errors::ServiceError;
use crate::person::domain::{Person, PersonId, PersonPatch};
use crate::person::repository::PersonRepository;

struct State {
    persons: Vec<Person>,
    next_id: i64,
}

impl State {
    fn position(&self, id: PersonId) -> Option<usize> {
        self.persons.iter().position(|p| p.id == id)
    }

    fn name_taken(&self, name: &str, except: Option<PersonId>) -> bool {
        self.persons
            .iter()
            .any(|p| Some(p.id) != except && same_name(&p.name, name))
    }

    fn allocate_id(&mut self) -> Result<PersonId, ServiceError> {
        let id = PersonId::new(self.next_id)?;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Internal("person id space exhausted".into()))?;
        Ok(id)
    }
}

pub struct MemoryPersonRepository {
    inner: RwLock<State>,
}

impl Default for MemoryPersonRepository {
    fn default() -> Self {
        Self { inner: RwLock::new(State { persons: Vec::new(), next_id: 1 }) }
    }
}

impl MemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given `(name, number)` pairs, ids assigned from 1.
    /// Later pairs whose name duplicates an earlier one are skipped.
    pub fn with_seed<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut state = State { persons: Vec::new(), next_id: 1 };
        for (name, number) in entries {
            let name = name.into();
            if state.name_taken(&name, None) {
                continue;
            }
            let Ok(id) = state.allocate_id() else { break };
            state.persons.push(Person { id, name, number: number.into() });
        }
        Self { inner: RwLock::new(state) }
    }

    /// The four demo contacts the service ships with.
    pub fn demo_seed() -> Self {
        Self::with_seed([
            ("Arto Hellas", "040-123456"),
            ("Ada Lovelace", "39-44-5323523"),
            ("Dan Abramov", "12-43-234345"),
            ("Mary Poppendieck", "39-23-6423122"),
        ])
    }
}

#[async_trait]
impl PersonRepository for MemoryPersonRepository {
    async fn list(&self, name: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        let state = self.inner.read().await;
        let persons = match name {
            Some(filter) => {
                let key = name_key(filter);
                state.persons.iter().filter(|p| name_key(&p.name) == key).cloned().collect()
            }
            None => state.persons.clone(),
        };
        Ok(persons)
    }

    async fn get(&self, id: PersonId) -> Result<Option<Person>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.persons.len() as u64)
    }

    async fn insert(&self, name: String, number: String) -> Result<Person, ServiceError> {
        let mut state = self.inner.write().await;
        if state.name_taken(&name, None) {
            return Err(ServiceError::DuplicateName);
        }
        let id = state.allocate_id()?;
        let person = Person { id, name, number };
        state.persons.push(person.clone());
        Ok(person)
    }

    async fn update(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>, ServiceError> {
        let mut state = self.inner.write().await;
        let Some(idx) = state.position(id) else { return Ok(None) };
        if let Some(name) = &patch.name {
            if state.name_taken(name, Some(id)) {
                return Err(ServiceError::DuplicateName);
            }
        }
        let person = &mut state.persons[idx];
        patch.apply_to(person);
        Ok(Some(person.clone()))
    }

    async fn delete(&self, id: PersonId) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        match state.position(id) {
            Some(idx) => {
                state.persons.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
