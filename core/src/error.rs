//! Error types for the task API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers
//! routinely branch on "no such task" and "the server rejected my input."
//! Every other non-success response lands in `HttpError` with the raw status
//! and body. `Transport` is the only error `HttpTaskClient` raises itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with the given `error` message.
    #[error("request rejected: {0}")]
    Validation(String),

    /// The server returned a non-success status other than 400/404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
