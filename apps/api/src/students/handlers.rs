use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::student::{Student, StudentInput};
use crate::state::AppState;
use crate::students::repository;

/// POST /students/
pub async fn handle_create_student(
    State(state): State<AppState>,
    AppJson(input): AppJson<StudentInput>,
) -> Result<Json<Student>, AppError> {
    let student = repository::create_student(&state.db, &input).await?;
    Ok(Json(student))
}

/// GET /students/
pub async fn handle_list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = repository::list_students(&state.db).await?;
    Ok(Json(students))
}

/// GET /students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Student>, AppError> {
    let student = repository::get_student(&state.db, id).await?;
    Ok(Json(student))
}

/// PUT /students/:id
pub async fn handle_update_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<StudentInput>,
) -> Result<Json<Student>, AppError> {
    let student = repository::update_student(&state.db, id, &input).await?;
    Ok(Json(student))
}

/// DELETE /students/:id
pub async fn handle_delete_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    repository::delete_student(&state.db, id).await?;
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}
