use std::fmt;

use async_trait::async_trait;

use super::types::{ChatRequest, RemoteAnswer};

/// Errors that can occur while asking the chat service.
/// None of them are retried; each surfaces as an assistant turn.
#[derive(Debug)]
pub enum ServiceError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// The server answered with a non-2xx status.
    Http { status: u16, body: String },
    /// The body was not JSON.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "네트워크 오류: {msg}"),
            ServiceError::Http { status, .. } => write!(f, "서버 응답 오류 (HTTP {status})"),
            ServiceError::Parse(msg) => write!(f, "응답 형식 오류: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Anything that can answer a chat request.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Returns the name of the service, for logging.
    fn name(&self) -> &str;

    /// Sends one request and returns the validated payload.
    async fn ask(&self, request: &ChatRequest) -> Result<RemoteAnswer, ServiceError>;
}
