use std::sync::Arc;

use service::person::{repo::MemoryPersonRepository, PersonRepository, PersonService};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub persons: PersonService,
}

impl AppState {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { persons: PersonService::new(repo) }
    }

    /// In-memory store preloaded with the demo contacts.
    pub fn demo() -> Self {
        Self::new(Arc::new(MemoryPersonRepository::demo_seed()))
    }
}
