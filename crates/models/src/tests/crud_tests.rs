use crate::db::connect;
use crate::errors::ModelError;
use crate::person;
use sea_orm::{DatabaseConnection, EntityTrait};
use anyhow::Result;
use migration::MigratorTrait;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix} {nanos}")
}

#[tokio::test]
async fn test_person_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let name = unique_name("Model Person");
    let created = person::create(&db, &name, "040-123456").await?;
    assert!(created.id > 0);
    assert_eq!(created.name, name);

    let found = person::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    person::Entity::delete_by_id(created.id).exec(&db).await?;
    let after = person::Entity::find_by_id(created.id).one(&db).await?;
    assert!(after.is_none());
    Ok(())
}

#[tokio::test]
async fn test_person_unique_name_is_case_insensitive() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let name = unique_name("Dup Person");
    let first = person::create(&db, &name, "1").await?;
    let err = person::create(&db, &name.to_uppercase(), "2").await.unwrap_err();
    assert!(matches!(err, ModelError::DuplicateName));

    person::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
