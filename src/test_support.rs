//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{AnswerService, ChatRequest, RemoteAnswer, ServiceError};

/// A service that answers every request with the same payload and counts calls.
pub struct CannedService {
    pub payload: serde_json::Value,
    pub calls: AtomicUsize,
}

impl CannedService {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerService for CannedService {
    fn name(&self) -> &str {
        "canned"
    }

    async fn ask(&self, _request: &ChatRequest) -> Result<RemoteAnswer, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RemoteAnswer::from_value(&self.payload))
    }
}

/// Creates a test App backed by an empty canned service.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(CannedService::new(serde_json::json!({}))))
}
