//! Generated document storage

use super::parse_uuid;
use crate::models::{DocType, LegalDocument};
use crate::{Error, Resource, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub async fn insert_document(pool: &SqlitePool, document: &LegalDocument) -> Result<()> {
    sqlx::query(
        "INSERT INTO documents (id, doc_type, language, content, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(document.id.to_string())
    .bind(document.doc_type.as_str())
    .bind(document.language.as_str())
    .bind(&document.content)
    .bind(&document.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_document(pool: &SqlitePool, id: Uuid) -> Result<LegalDocument> {
    let row = sqlx::query("SELECT * FROM documents WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(Resource::Document))?;

    let stored_id: String = row.try_get("id")?;
    let doc_type: String = row.try_get("doc_type")?;
    let language: String = row.try_get("language")?;

    Ok(LegalDocument {
        id: parse_uuid("document id", &stored_id)?,
        doc_type: doc_type
            .parse::<DocType>()
            .map_err(|e| Error::corrupt("doc_type", &doc_type, e))?,
        language: language.into(),
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}
