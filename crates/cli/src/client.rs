// HTTP client for the tasks API.

use serde::de::DeserializeOwned;
use taskboard_common::{
    protocol::http::{
        CreateTaskRequest, DeleteTaskRequest, DeleteTaskResponse, ErrorBody, TODOS_PATH,
    },
    types::{Task, TaskId},
};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server is not reachable at `{url}`: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("failed to decode server response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The operations a view needs from the server.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError>;
    async fn create(&self, text: &str) -> Result<Task, ClientError>;
    async fn delete(&self, id: TaskId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    todos_url: Url,
}

impl TaskClient {
    pub fn new(base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self { http: reqwest::Client::new(), todos_url: base_url.join(TODOS_PATH)? })
    }

    pub fn todos_url(&self) -> &Url {
        &self.todos_url
    }

    fn unreachable(&self, source: reqwest::Error) -> ClientError {
        ClientError::Unreachable { url: self.todos_url.to_string(), source }
    }
}

impl TaskApi for TaskClient {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = self
            .http
            .get(self.todos_url.clone())
            .send()
            .await
            .map_err(|error| self.unreachable(error))?;
        decode(response).await
    }

    async fn create(&self, text: &str) -> Result<Task, ClientError> {
        let response = self
            .http
            .post(self.todos_url.clone())
            .json(&CreateTaskRequest { text: text.to_string() })
            .send()
            .await
            .map_err(|error| self.unreachable(error))?;
        decode(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.todos_url.clone())
            .json(&DeleteTaskRequest { id })
            .send()
            .await
            .map_err(|error| self.unreachable(error))?;
        decode::<DeleteTaskResponse>(response).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Decode);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };

    Err(if status == reqwest::StatusCode::NOT_FOUND {
        ClientError::NotFound { message }
    } else if status.is_client_error() {
        ClientError::Rejected { status: status.as_u16(), message }
    } else {
        ClientError::Server { status: status.as_u16(), message }
    })
}
