//! Person record store: domain, repository contract and backings, service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{NewPerson, Person, PersonId, PersonPatch};
pub use repository::PersonRepository;
pub use service::PersonService;
