use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Column widths of the `person` table.
pub const NAME_MAX_LEN: usize = 256;
pub const NUMBER_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub number: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Present and non-empty, or `MissingField(field)`.
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, errors::ModelError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(errors::ModelError::MissingField(field)),
    }
}

/// Key used for name uniqueness and the list filter in memory. Lowercase only;
/// no trimming. The Postgres store folds with `LOWER()` instead.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

pub fn same_name(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Checks enforced before writing to the table: column widths, and no NUL
/// characters, which Postgres text columns cannot store.
pub fn validate_fields(name: Option<&str>, number: Option<&str>) -> Result<(), errors::ModelError> {
    for (field, value) in [("name", name), ("number", number)] {
        if value.is_some_and(|v| v.contains('\0')) {
            return Err(errors::ModelError::Validation(format!("{field} contains a NUL character")));
        }
    }
    if let Some(n) = name {
        if n.chars().count() > NAME_MAX_LEN {
            return Err(errors::ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
        }
    }
    if let Some(n) = number {
        if n.chars().count() > NUMBER_MAX_LEN {
            return Err(errors::ModelError::Validation(format!("number longer than {NUMBER_MAX_LEN} characters")));
        }
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, number: &str) -> Result<Model, errors::ModelError> {
    let name = require_field("name", Some(name))?;
    let number = require_field("number", Some(number))?;
    validate_fields(Some(&name), Some(&number))?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name),
        number: Set(number),
    };
    Ok(am.insert(db).await?)
}

#[cfg(test)]
mod validation_tests {
    use super::*;
    use crate::errors::ModelError;

    #[test]
    fn require_field_rejects_missing_and_empty() {
        assert!(matches!(require_field("name", None), Err(ModelError::MissingField("name"))));
        assert!(matches!(require_field("number", Some("")), Err(ModelError::MissingField("number"))));
        assert_eq!(require_field("name", Some("Ada")).unwrap(), "Ada");
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(ModelError::MissingField("number").to_string(), "number must be specified");
    }

    #[test]
    fn name_comparison_ignores_case_but_not_whitespace() {
        assert!(same_name("Ada Lovelace", "ada lovelace"));
        assert!(same_name("ARTO HELLAS", "arto hellas"));
        assert!(!same_name("Ada Lovelace", "AdaLovelace"));
        assert!(!same_name("Ada Lovelace", " Ada Lovelace"));
    }

    #[test]
    fn length_limits() {
        assert!(validate_fields(Some("a"), Some("1")).is_ok());
        assert!(validate_fields(Some(&"a".repeat(NAME_MAX_LEN + 1)), None).is_err());
        assert!(validate_fields(None, Some(&"1".repeat(NUMBER_MAX_LEN + 1))).is_err());
        assert!(validate_fields(None, None).is_ok());
    }

    #[test]
    fn validate_fields_rejects_nul() {
        assert!(matches!(validate_fields(Some("a\0b"), Some("1")), Err(ModelError::Validation(_))));
        assert!(matches!(validate_fields(None, Some("1\u{0}")), Err(ModelError::Validation(_))));
    }
}
