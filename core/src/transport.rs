//! Async pass-through executor for `TaskClient` requests.

use reqwest::Method;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, UpdateTask};

/// One method per service operation. Each returns the server's response
/// unmodified; status interpretation is left to the caller (see
/// `TaskClient::parse_*`).
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    requests: TaskClient,
    http: reqwest::Client,
}

impl HttpTaskClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            requests: TaskClient::new(base_url),
            http,
        }
    }

    /// The underlying builder/parser.
    pub fn requests(&self) -> &TaskClient {
        &self.requests
    }

    pub async fn get_tasks(&self) -> Result<HttpResponse, ApiError> {
        self.execute(self.requests.build_get_tasks()).await
    }

    pub async fn create_task(&self, input: &CreateTask) -> Result<HttpResponse, ApiError> {
        let request = self.requests.build_create_task(input)?;
        self.execute(request).await
    }

    pub async fn update_task(
        &self,
        id: &str,
        updates: &UpdateTask,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.requests.build_update_task(id, updates)?;
        self.execute(request).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.execute(self.requests.build_delete_task(id)).await
    }

    /// Perform the round-trip. Only a failure to obtain a response is an error.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.path, "sending request");

        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}
