//! HTTP client for the consultation chat endpoint.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use super::service::{AnswerService, ServiceError};
use super::types::{ChatRequest, RemoteAnswer};

/// Fixed path of the chat endpoint, appended to the configured base URL.
pub const CHAT_PATH: &str = "/api/chat";

/// Chat service reached over HTTP. No request timeout is set.
pub struct ChatClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// `base_url` is expected without trailing slashes (see `core::config::normalize_base_url`).
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{base_url}{CHAT_PATH}"),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerService for ChatClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, request: &ChatRequest) -> Result<RemoteAnswer, ServiceError> {
        info!(
            "Chat request: endpoint={}, intent={:?}, message_len={}",
            self.endpoint,
            request.intent,
            request.message.len()
        );

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Chat response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat API error: {} - {}", status, body);
            return Err(ServiceError::Http { status, body });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        debug!("Chat payload: {}", value);

        Ok(RemoteAnswer::from_value(&value))
    }
}
