//! SeaORM-backed person store (Postgres).
//!
//! Ids come from the table's bigserial key. Name uniqueness is pre-checked
//! with `LOWER(name) = LOWER($1)` and backed by a unique expression index, so
//! a racing insert still surfaces as `DuplicateName`. Both sides are folded
//! by the database, so non-ASCII case folding follows its collation rather
//! than Rust's `to_lowercase` used by the memory store.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use models::person::{self as person_model, Entity as PersonEntity};

use crate::errors::ServiceError;
use crate::person::domain::{Person, PersonId, PersonPatch};
use crate::person::repository::PersonRepository;

pub struct SeaOrmPersonRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPersonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn lower_name_eq(name: &str) -> sea_orm::sea_query::SimpleExpr {
        Expr::expr(Func::lower(Expr::col(person_model::Column::Name)))
            .eq(Func::lower(Expr::val(name.to_owned())))
    }

    async fn name_owner(&self, name: &str) -> Result<Option<i64>, ServiceError> {
        let found = PersonEntity::find()
            .filter(Self::lower_name_eq(name))
            .one(&self.db)
            .await?;
        Ok(found.map(|m| m.id))
    }
}

#[async_trait]
impl PersonRepository for SeaOrmPersonRepository {
    async fn list(&self, name: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        let mut finder = PersonEntity::find();
        if let Some(n) = name {
            finder = finder.filter(Self::lower_name_eq(n));
        }
        let rows = finder.order_by_asc(person_model::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn get(&self, id: PersonId) -> Result<Option<Person>, ServiceError> {
        let found = PersonEntity::find_by_id(id.get()).one(&self.db).await?;
        Ok(found.map(Person::from))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(PersonEntity::find().count(&self.db).await?)
    }

    async fn insert(&self, name: String, number: String) -> Result<Person, ServiceError> {
        if self.name_owner(&name).await?.is_some() {
            return Err(ServiceError::DuplicateName);
        }
        let created = person_model::create(&self.db, &name, &number).await?;
        Ok(created.into())
    }

    async fn update(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>, ServiceError> {
        let Some(existing) = PersonEntity::find_by_id(id.get()).one(&self.db).await? else {
            return Ok(None);
        };
        person_model::validate_fields(patch.name.as_deref(), patch.number.as_deref())?;
        if let Some(name) = &patch.name {
            if matches!(self.name_owner(name).await?, Some(owner) if owner != existing.id) {
                return Err(ServiceError::DuplicateName);
            }
        }
        if patch.is_empty() {
            return Ok(Some(existing.into()));
        }
        let mut am: person_model::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            am.name = Set(name);
        }
        if let Some(number) = patch.number {
            am.number = Set(number);
        }
        let updated = am.update(&self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: PersonId) -> Result<bool, ServiceError> {
        let res = PersonEntity::delete_by_id(id.get()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
