//! Record API: list, find, create and sparse-update for every table.
//!
//! Each row type implements [`Record`]; the generic functions below and the
//! handlers in [`handlers`] are shared by all of them.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::errors::AppError;

pub mod entities;
pub mod handlers;
pub mod queries;

#[async_trait]
pub trait Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    /// Human-readable name used in error messages.
    const LABEL: &'static str;
    const LIST_ORDER: &'static str = "id";

    type New: DeserializeOwned + Send + Sync + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    fn id(&self) -> i32;

    /// Merges a sparse patch into the row, re-checking row-level rules.
    fn apply_patch(self, patch: Self::Patch) -> Result<Self, AppError>;

    async fn insert(pool: &PgPool, new: &Self::New) -> Result<Self, AppError>;

    /// Writes every column of `self` back; `None` when the row no longer exists.
    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError>;
}

pub async fn list<R: Record>(pool: &PgPool) -> Result<Vec<R>, AppError> {
    let sql = format!("SELECT * FROM {} ORDER BY {}", R::TABLE, R::LIST_ORDER);
    Ok(sqlx::query_as::<_, R>(&sql).fetch_all(pool).await?)
}

pub async fn find<R: Record>(pool: &PgPool, id: i32) -> Result<R, AppError> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", R::TABLE);
    sqlx::query_as::<_, R>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<R>(id))
}

pub async fn create<R: Record>(pool: &PgPool, new: &R::New) -> Result<R, AppError> {
    let row = R::insert(pool, new).await?;
    info!("Created {} {}", R::LABEL, row.id());
    Ok(row)
}

/// Fetches the row, merges `changes` into it and writes it back whole.
pub async fn patch<R: Record>(pool: &PgPool, id: i32, changes: R::Patch) -> Result<R, AppError> {
    let current = find::<R>(pool, id).await?;
    let merged = current.apply_patch(changes)?;
    let row = merged.update(pool).await?.ok_or_else(|| not_found::<R>(id))?;
    info!("Updated {} {}", R::LABEL, id);
    Ok(row)
}

fn not_found<R: Record>(id: i32) -> AppError {
    AppError::NotFound(format!("{} {id} not found", R::LABEL))
}
