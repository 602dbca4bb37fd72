//! Student volunteer queries

use super::{parse_uuid, LIST_LIMIT};
use crate::models::{CaseStatus, Student};
use crate::{Error, Resource, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn student_from_row(row: &SqliteRow) -> Result<Student> {
    let id: String = row.try_get("id")?;
    let skills: String = row.try_get("skills")?;

    Ok(Student {
        id: parse_uuid("student id", &id)?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        college: row.try_get("college")?,
        skills: serde_json::from_str(&skills)
            .map_err(|e| Error::corrupt("skills", &skills, e))?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn insert_student(pool: &SqlitePool, student: &Student) -> Result<()> {
    let skills = serde_json::to_string(&student.skills)?;

    sqlx::query(
        "INSERT INTO students (id, name, email, college, skills, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(student.id.to_string())
    .bind(&student.name)
    .bind(&student.email)
    .bind(&student.college)
    .bind(skills)
    .bind(&student.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Students in registration order
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>> {
    let rows = sqlx::query("SELECT * FROM students ORDER BY created_at, rowid LIMIT ?")
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    rows.iter().map(student_from_row).collect()
}

pub async fn get_student(pool: &SqlitePool, id: Uuid) -> Result<Student> {
    let row = sqlx::query("SELECT * FROM students WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(Resource::Student))?;

    student_from_row(&row)
}

pub async fn student_exists(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE id = ?")
        .bind(id.to_string())
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Delete a student. Cases assigned to them are released back to `open`.
pub async fn delete_student(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE cases SET status = CASE WHEN status = ? THEN ? ELSE status END, assigned_student_id = NULL WHERE assigned_student_id = ?",
    )
    .bind(CaseStatus::Assigned.as_str())
    .bind(CaseStatus::Open.as_str())
    .bind(id.to_string())
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(Resource::Student));
    }

    tx.commit().await?;
    Ok(())
}

/// Remove every student (used by seeding)
pub async fn clear_students(pool: &SqlitePool) -> Result<u64> {
    sqlx::query("UPDATE cases SET assigned_student_id = NULL")
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM students").execute(pool).await?;
    Ok(result.rows_affected())
}
