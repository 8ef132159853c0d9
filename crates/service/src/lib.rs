//! Service layer owning the person record store.
//! - `person::repository` defines the storage contract, with in-memory and SeaORM backings.
//! - `person::service` applies the business rules (required fields, uniqueness, not-found policy).
//! - `errors::ServiceError` is the taxonomy the HTTP layer maps to status codes.

pub mod errors;
pub mod person;
#[cfg(test)]
pub mod test_support;

pub use person::PersonService;
