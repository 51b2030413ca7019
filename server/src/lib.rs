use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::ServerConfig;
pub use error::ServiceError;
pub use model::{
    Confirmation, CreateTaskRequest, ErrorBody, NewTask, Task, TaskId, TaskPatch,
    UpdateTaskRequest, ValidationError,
};
#[cfg(feature = "mongodb")]
pub use store::MongoStore;
pub use store::{MemoryStore, StoreError, TaskStore};

/// Router state: the store handle built once at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

pub fn app(store: Arc<dyn TaskStore>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(store))
}

pub async fn run(listener: TcpListener, store: Arc<dyn TaskStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Open the store named by `config`. Callers must not start serving if this fails.
pub async fn connect_store(config: &ServerConfig) -> Result<Arc<dyn TaskStore>, StoreError> {
    if config.uses_memory_store() {
        tracing::warn!("using in-memory task store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    #[cfg(feature = "mongodb")]
    {
        let store =
            MongoStore::connect(&config.store_uri, &config.database, &config.collection).await?;
        Ok(Arc::new(store))
    }
    #[cfg(not(feature = "mongodb"))]
    {
        Err(StoreError::Backend(format!(
            "cannot open {}: built without the mongodb feature",
            config.store_uri
        )))
    }
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ServiceError> {
    let tasks = state
        .store
        .find_all()
        .await
        .map_err(|e| ServiceError::store("failed to list tasks", e))?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ServiceError> {
    let Json(input) = payload?;
    let new_task = input.validate(Utc::now())?;
    let task = state
        .store
        .insert_one(new_task)
        .await
        .map_err(|e| ServiceError::store("failed to create task", e))?;
    tracing::info!(task_id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Confirmation>, ServiceError> {
    let Json(input) = payload?;
    let patch = input.validate()?;
    let matched = state
        .store
        .update_one(&id, &patch)
        .await
        .map_err(|e| ServiceError::store("failed to update task", e))?;
    if !matched {
        return Err(ServiceError::NotFound);
    }
    tracing::info!(task_id = %id, "task updated");
    Ok(Json(Confirmation::new("task updated")))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<Confirmation>, ServiceError> {
    let deleted = state
        .store
        .delete_one(&id)
        .await
        .map_err(|e| ServiceError::store("failed to delete task", e))?;
    if !deleted {
        return Err(ServiceError::NotFound);
    }
    tracing::info!(task_id = %id, "task deleted");
    Ok(Json(Confirmation::new("task deleted")))
}
