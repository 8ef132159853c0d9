use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} must be specified")]
    MissingField(&'static str),
    #[error("name must be unique")]
    DuplicateName,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Postgres SQLSTATE of a failed statement, when the driver reported one.
fn sqlstate(e: &DbErr) -> Option<String> {
    match e {
        DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err)) => err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}

/// Class 23 is integrity constraint violation, class 22 is data exception.
/// Both are rejections of the written values, not backend faults.
pub fn classify_sqlstate(code: &str, message: String) -> ModelError {
    match code {
        "23505" => ModelError::DuplicateName,
        c if c.starts_with("23") || c.starts_with("22") => ModelError::Validation(message),
        _ => ModelError::Db(message),
    }
}

impl From<DbErr> for ModelError {
    /// Constraint violations are client-visible; everything else stays opaque.
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => return ModelError::DuplicateName,
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return ModelError::Validation(msg),
            _ => {}
        }
        match sqlstate(&e) {
            Some(code) => classify_sqlstate(&code, e.to_string()),
            None => ModelError::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_classes() {
        assert!(matches!(classify_sqlstate("23505", "dup".into()), ModelError::DuplicateName));
        assert!(matches!(classify_sqlstate("23502", "not null".into()), ModelError::Validation(_)));
        assert!(matches!(classify_sqlstate("23514", "check".into()), ModelError::Validation(_)));
        assert!(matches!(classify_sqlstate("22021", "bad byte".into()), ModelError::Validation(_)));
        assert!(matches!(classify_sqlstate("22001", "too long".into()), ModelError::Validation(_)));
        assert!(matches!(classify_sqlstate("08006", "conn".into()), ModelError::Db(_)));
        assert!(matches!(classify_sqlstate("42P01", "no table".into()), ModelError::Db(_)));
    }

    #[test]
    fn errors_without_sqlstate_stay_opaque() {
        let e = ModelError::from(DbErr::Custom("boom".into()));
        assert!(matches!(e, ModelError::Db(_)));
        let e = ModelError::from(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(e, ModelError::Db(_)));
    }
}
