use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TaskStore};
use crate::model::{NewTask, Task, TaskId, TaskPatch};

/// In-process collection keyed by UUID v4. Lists in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_id(id: &TaskId) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id.as_str()).map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn insert_one(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = task.into_task(TaskId::new(Uuid::new_v4().to_string()));
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_one(&self, id: &TaskId, patch: &TaskPatch) -> Result<bool, StoreError> {
        parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|task| task.id == *id) {
            Some(task) => {
                patch.apply(task);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, id: &TaskId) -> Result<bool, StoreError> {
        parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != *id);
        Ok(tasks.len() != before)
    }
}
