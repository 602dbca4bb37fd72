//! Case queries and assignment rules

use super::{parse_uuid, student_exists, LIST_LIMIT};
use crate::models::{Case, CaseStatus, CaseUpdate};
use crate::{Error, Resource, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn case_from_row(row: &SqliteRow) -> Result<Case> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let assigned: Option<String> = row.try_get("assigned_student_id")?;

    Ok(Case {
        id: parse_uuid("case id", &id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        status: status
            .parse::<CaseStatus>()
            .map_err(|e| Error::corrupt("status", &status, e))?,
        created_at: row.try_get("created_at")?,
        assigned_student_id: assigned
            .as_deref()
            .map(|s| parse_uuid("assigned_student_id", s))
            .transpose()?,
    })
}

pub async fn insert_case(pool: &SqlitePool, case: &Case) -> Result<()> {
    sqlx::query(
        "INSERT INTO cases (id, title, description, category, status, created_at, assigned_student_id) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(case.id.to_string())
    .bind(&case.title)
    .bind(&case.description)
    .bind(&case.category)
    .bind(case.status.as_str())
    .bind(&case.created_at)
    .bind(case.assigned_student_id.map(|id| id.to_string()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Cases in creation order
pub async fn list_cases(pool: &SqlitePool) -> Result<Vec<Case>> {
    let rows = sqlx::query("SELECT * FROM cases ORDER BY created_at, rowid LIMIT ?")
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    rows.iter().map(case_from_row).collect()
}

pub async fn get_case(pool: &SqlitePool, id: Uuid) -> Result<Case> {
    let row = sqlx::query("SELECT * FROM cases WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(Resource::Case))?;

    case_from_row(&row)
}

pub async fn cases_for_student(pool: &SqlitePool, student_id: Uuid) -> Result<Vec<Case>> {
    let rows = sqlx::query(
        "SELECT * FROM cases WHERE assigned_student_id = ? ORDER BY created_at, rowid LIMIT ?",
    )
    .bind(student_id.to_string())
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    rows.iter().map(case_from_row).collect()
}

/// Status implied by an assignment change when the caller gave none.
///
/// Assigning an open case marks it assigned; releasing an assigned case
/// reopens it. Any other status is left as is.
pub fn status_after_assignment(current: CaseStatus, assigned: Option<Uuid>) -> CaseStatus {
    match (current, assigned) {
        (CaseStatus::Open, Some(_)) => CaseStatus::Assigned,
        (CaseStatus::Assigned, None) => CaseStatus::Open,
        (status, _) => status,
    }
}

/// Apply a partial update and return the stored case
pub async fn update_case(pool: &SqlitePool, id: Uuid, update: CaseUpdate) -> Result<Case> {
    if update.is_empty() {
        return Err(Error::InvalidInput("No update data provided".to_string()));
    }

    let mut case = get_case(pool, id).await?;

    if let Some(Some(student_id)) = update.assigned_student_id {
        if !student_exists(pool, student_id).await? {
            return Err(Error::InvalidInput(format!(
                "Student {} does not exist",
                student_id
            )));
        }
    }

    if let Some(title) = update.title {
        case.title = title;
    }
    if let Some(description) = update.description {
        case.description = description;
    }
    if let Some(category) = update.category {
        case.category = category;
    }
    if let Some(assigned) = update.assigned_student_id {
        if update.status.is_none() {
            case.status = status_after_assignment(case.status, assigned);
        }
        case.assigned_student_id = assigned;
    }
    if let Some(status) = update.status {
        case.status = status;
    }

    sqlx::query(
        "UPDATE cases SET title = ?, description = ?, category = ?, status = ?, assigned_student_id = ? WHERE id = ?",
    )
    .bind(&case.title)
    .bind(&case.description)
    .bind(&case.category)
    .bind(case.status.as_str())
    .bind(case.assigned_student_id.map(|id| id.to_string()))
    .bind(id.to_string())
    .execute(pool)
    .await?;

    Ok(case)
}

pub async fn delete_case(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM cases WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(Resource::Case));
    }

    Ok(())
}

/// Remove every case (used by seeding)
pub async fn clear_cases(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cases").execute(pool).await?;
    Ok(result.rows_affected())
}
