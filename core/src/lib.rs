//! Client for the task service.
//!
//! # Overview
//! `TaskClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO). `HttpTaskClient` performs the
//! round-trip with reqwest and hands the raw response back to the caller.
//!
//! # Design
//! - `TaskClient` is stateless; it holds only `base_url`.
//! - No validation, retry, or caching happens client-side. The service owns
//!   all validation and error semantics.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::TaskClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::HttpTaskClient;
pub use types::{Confirmation, CreateTask, ErrorBody, Task, UpdateTask};
