//! Legal query history

use super::parse_uuid;
use crate::models::{Category, LegalQuery};
use crate::{Error, Resource, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn query_from_row(row: &SqliteRow) -> Result<LegalQuery> {
    let id: String = row.try_get("id")?;
    let language: String = row.try_get("detected_language")?;
    let category: String = row.try_get("category")?;

    Ok(LegalQuery {
        id: parse_uuid("query id", &id)?,
        query_text: row.try_get("query_text")?,
        detected_language: language.into(),
        category: category
            .parse::<Category>()
            .map_err(|e| Error::corrupt("category", &category, e))?,
        response_text: row.try_get("response_text")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn insert_query(pool: &SqlitePool, query: &LegalQuery) -> Result<()> {
    sqlx::query(
        "INSERT INTO queries (id, query_text, detected_language, category, response_text, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(query.id.to_string())
    .bind(&query.query_text)
    .bind(query.detected_language.as_str())
    .bind(query.category.as_str())
    .bind(&query.response_text)
    .bind(&query.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_query(pool: &SqlitePool, id: Uuid) -> Result<LegalQuery> {
    let row = sqlx::query("SELECT * FROM queries WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(Resource::Query))?;

    query_from_row(&row)
}

/// Most recent queries first
pub async fn list_queries(pool: &SqlitePool, limit: i64) -> Result<Vec<LegalQuery>> {
    let rows = sqlx::query("SELECT * FROM queries ORDER BY created_at DESC, rowid DESC LIMIT ?")
        .bind(limit.clamp(1, super::LIST_LIMIT))
        .fetch_all(pool)
        .await?;

    rows.iter().map(query_from_row).collect()
}
