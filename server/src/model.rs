//! Task records and the per-operation request/response schemas.
//!
//! # Design
//! Request bodies are deserialized into loosely typed schemas first and then
//! validated into `NewTask` / `TaskPatch`. A wrong-typed field therefore
//! reports which field is wrong instead of surfacing as a generic JSON
//! rejection, and the rules can be exercised without an HTTP round-trip.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Opaque identifier assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated task that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            text: self.text,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

/// A validated partial update. At least one field is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is required")]
    MissingText,

    #[error("text must be a non-empty string")]
    InvalidText,

    #[error("completed must be a boolean")]
    InvalidCompleted,

    #[error("no fields provided to update")]
    NothingToUpdate,

    #[error("invalid request body: {0}")]
    Body(String),
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
}

impl CreateTaskRequest {
    /// The submitted text is kept as-is; only its trimmed form is checked.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewTask, ValidationError> {
        let text = match self.text {
            None => return Err(ValidationError::MissingText),
            Some(Value::String(text)) if !text.trim().is_empty() => text,
            Some(_) => return Err(ValidationError::InvalidText),
        };
        Ok(NewTask {
            text,
            completed: false,
            created_at: now,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Value>,
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<TaskPatch, ValidationError> {
        let text = match self.text {
            None => None,
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::InvalidText);
                }
                Some(trimmed.to_string())
            }
            Some(_) => return Err(ValidationError::InvalidText),
        };

        let completed = match self.completed {
            None => None,
            Some(Value::Bool(completed)) => Some(completed),
            Some(_) => return Err(ValidationError::InvalidCompleted),
        };

        if text.is_none() && completed.is_none() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(TaskPatch { text, completed })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
