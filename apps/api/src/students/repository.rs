//! Storage access for the `students` table.
//!
//! Every function opens exactly one transaction. It is committed on success;
//! any early return drops it, which rolls it back.

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::student::{Student, StudentInput};

/// Validates `input`, inserts it and returns the stored row with its assigned id.
pub async fn create_student(pool: &SqlitePool, input: &StudentInput) -> Result<Student, AppError> {
    input.validate()?;

    let mut tx = pool.begin().await?;
    let student = sqlx::query_as::<_, Student>(
        "INSERT INTO students (name, age) VALUES (?, ?) RETURNING id, name, age",
    )
    .bind(&input.name)
    .bind(input.age)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("Created student {}", student.id);
    Ok(student)
}

/// Returns every student ordered by id. Empty when the table is empty.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>, AppError> {
    let mut tx = pool.begin().await?;
    let students =
        sqlx::query_as::<_, Student>("SELECT id, name, age FROM students ORDER BY id ASC")
            .fetch_all(&mut *tx)
            .await?;
    tx.commit().await?;
    Ok(students)
}

pub async fn get_student(pool: &SqlitePool, id: i64) -> Result<Student, AppError> {
    let mut tx = pool.begin().await?;
    let student =
        sqlx::query_as::<_, Student>("SELECT id, name, age FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(AppError::student_not_found)?;
    tx.commit().await?;
    Ok(student)
}

/// Replaces `name` and `age` of an existing student. No field is merged.
pub async fn update_student(
    pool: &SqlitePool,
    id: i64,
    input: &StudentInput,
) -> Result<Student, AppError> {
    input.validate()?;

    let mut tx = pool.begin().await?;
    let student = sqlx::query_as::<_, Student>(
        "UPDATE students SET name = ?, age = ? WHERE id = ? RETURNING id, name, age",
    )
    .bind(&input.name)
    .bind(input.age)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(AppError::student_not_found)?;
    tx.commit().await?;

    info!("Updated student {id}");
    Ok(student)
}

/// Permanently removes a student.
pub async fn delete_student(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::student_not_found());
    }
    tx.commit().await?;

    info!("Deleted student {id}");
    Ok(())
}
