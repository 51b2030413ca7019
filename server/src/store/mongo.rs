use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use super::{StoreError, TaskStore};
use crate::model::{NewTask, Task, TaskId, TaskPatch};

/// Task collection in a MongoDB database. Ids are ObjectIds in hex form.
#[derive(Debug, Clone)]
pub struct MongoStore {
    tasks: Collection<TaskDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    text: String,
    completed: bool,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
}

impl TaskDocument {
    fn into_task(self) -> Result<Task, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Backend("document without _id".to_string()))?;
        Ok(Task {
            id: TaskId::new(id.to_hex()),
            text: self.text,
            completed: self.completed,
            created_at: from_bson_datetime(self.created_at)?,
        })
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

fn from_bson_datetime(value: BsonDateTime) -> Result<DateTime<Utc>, StoreError> {
    let millis = value.timestamp_millis();
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::Backend(format!("createdAt out of range: {millis}")))
}

/// Documents that do not fit the task schema (foreign `_id` type, missing
/// fields) are skipped so one bad record cannot fail the whole listing.
fn decode_task(raw: Document) -> Option<Task> {
    let raw_id = raw.get("_id").cloned();
    let decoded = from_document::<TaskDocument>(raw)
        .map_err(|e| StoreError::Backend(e.to_string()))
        .and_then(TaskDocument::into_task);
    match decoded {
        Ok(task) => Some(task),
        Err(e) => {
            tracing::warn!(id = ?raw_id, error = %e, "skipping malformed task document");
            None
        }
    }
}

fn parse_id(id: &TaskId) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| StoreError::MalformedId(id.to_string()))
}

impl MongoStore {
    /// Connect and ping the server so an unreachable store fails here rather
    /// than on the first request.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database, collection, "connected to MongoDB");
        Ok(Self {
            tasks: db.collection(collection),
        })
    }
}

#[async_trait]
impl TaskStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        let cursor = self.tasks.clone_with_type::<Document>().find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().filter_map(decode_task).collect())
    }

    async fn insert_one(&self, task: NewTask) -> Result<Task, StoreError> {
        let document = TaskDocument {
            id: None,
            text: task.text.clone(),
            completed: task.completed,
            created_at: BsonDateTime::from_millis(task.created_at.timestamp_millis()),
        };
        let result = self.tasks.insert_one(&document).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("inserted _id is not an ObjectId".to_string()))?;
        Ok(task.into_task(TaskId::new(id.to_hex())))
    }

    async fn update_one(&self, id: &TaskId, patch: &TaskPatch) -> Result<bool, StoreError> {
        let oid = parse_id(id)?;
        let mut set = Document::new();
        if let Some(text) = &patch.text {
            set.insert("text", text.as_str());
        }
        if let Some(completed) = patch.completed {
            set.insert("completed", completed);
        }
        let result = self
            .tasks
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, id: &TaskId) -> Result<bool, StoreError> {
        let oid = parse_id(id)?;
        let result = self.tasks.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}
