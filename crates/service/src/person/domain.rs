use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Store-assigned identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub fn new(raw: i64) -> Result<Self, ServiceError> {
        if raw > 0 { Ok(Self(raw)) } else { Err(ServiceError::InvalidId) }
    }

    pub fn get(self) -> i64 { self.0 }
}

impl FromStr for PersonId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.parse::<i64>().map_err(|_| ServiceError::InvalidId)?;
        Self::new(raw)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored person as seen by callers (detached copy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

impl From<models::person::Model> for Person {
    fn from(m: models::person::Model) -> Self {
        // Postgres bigserial starts at 1, so the key is always positive.
        Self { id: PersonId(m.id), name: m.name, number: m.number }
    }
}

/// Create input; both fields are required but checked by the service so the
/// error can name the missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Partial update. Absent or empty fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl PersonPatch {
    pub fn number(number: impl Into<String>) -> Self {
        Self { name: None, number: Some(number.into()) }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), number: None }
    }

    /// Drop empty strings so they behave like absent fields.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|s| !s.is_empty()),
            number: self.number.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.number.is_none()
    }

    /// Apply in place; `id` is never touched.
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(number) = &self.number {
            person.number = number.clone();
        }
    }
}
