//! Single-statement data access, one repository per entity family.

pub mod actor;
pub mod actor_movie;
pub mod movie;
pub mod person;

use super::query::{self, Listing, Page};
use super::{StoreError, StoreResult};
use crate::models::options::QueryOptions;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, StatementBuilder};

/// Runs a `… RETURNING *` statement and maps the first returned row.
async fn returning_one<E, S>(conn: &DatabaseConnection, stmt: &S) -> StoreResult<Option<E::Model>>
where
    E: EntityTrait,
    S: StatementBuilder,
{
    let backend = conn.get_database_backend();
    let row = E::find().from_raw_sql(backend.build(stmt)).one(conn).await?;
    Ok(row)
}

async fn returning_all<E, S>(conn: &DatabaseConnection, stmt: &S) -> StoreResult<Vec<E::Model>>
where
    E: EntityTrait,
    S: StatementBuilder,
{
    let backend = conn.get_database_backend();
    let rows = E::find().from_raw_sql(backend.build(stmt)).all(conn).await?;
    Ok(rows)
}

async fn find_by_id<E>(conn: &DatabaseConnection, id: i32) -> StoreResult<E::Model>
where
    E: Listing,
    <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<i32>,
{
    E::find_by_id(id).one(conn).await?.ok_or(StoreError::NoRows)
}

async fn page<E: Listing>(
    conn: &DatabaseConnection,
    options: &QueryOptions,
    page: Page,
) -> StoreResult<Vec<E::Model>> {
    let select = query::select_page::<E>(options, page)?;
    Ok(select.all(conn).await?)
}

async fn update_by_id<E: Listing>(
    conn: &DatabaseConnection,
    id: i32,
    changes: Vec<(E::Column, sea_orm::Value)>,
) -> StoreResult<E::Model> {
    let stmt = query::update_by_id::<E>(id, changes)?;
    returning_one::<E, _>(conn, &stmt)
        .await?
        .ok_or(StoreError::NoRows)
}

async fn delete_by_id<E: Listing>(conn: &DatabaseConnection, id: i32) -> StoreResult<E::Model> {
    let stmt = query::delete_by_id::<E>(id);
    returning_one::<E, _>(conn, &stmt)
        .await?
        .ok_or(StoreError::NoRows)
}
