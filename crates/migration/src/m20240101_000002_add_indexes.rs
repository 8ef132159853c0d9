//! Case-insensitive uniqueness on `person.name`.
//!
//! Expression indexes are not expressible through the schema builder, so the
//! statement is issued as raw SQL.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UP: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_person_name_lower ON person (LOWER(name))";
const DOWN: &str = "DROP INDEX IF EXISTS idx_person_name_lower";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(UP).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DOWN).await?;
        Ok(())
    }
}
