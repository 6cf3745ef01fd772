use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// A persisted student row. `id` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Request body for create and update.
/// Has no `id` field: a caller-supplied `id` is ignored like any other unknown field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub age: i64,
}

impl StudentInput {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Must pass before any storage write. `name` is stored as given.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        Ok(())
    }
}
