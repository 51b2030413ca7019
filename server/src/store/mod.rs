//! Persistence seam for task records.
//!
//! Every request handler performs exactly one call on a `TaskStore`. The
//! handle is built once at startup and shared through the router state.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NewTask, Task, TaskId, TaskPatch};

mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier does not match the store's id format.
    #[error("malformed task id: {0}")]
    MalformedId(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Document collection holding task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All records, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Persist a new record; the store assigns its id.
    async fn insert_one(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Apply `patch` to the record with `id`. Returns `false` when nothing matched.
    async fn update_one(&self, id: &TaskId, patch: &TaskPatch) -> Result<bool, StoreError>;

    /// Remove the record with `id`. Returns `false` when nothing matched.
    async fn delete_one(&self, id: &TaskId) -> Result<bool, StoreError>;
}
