//! # Application State
//!
//! Core business state for the consultation client. Domain logic only;
//! presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn AnswerService>   // chat endpoint
//! ├── conversation: Conversation        // ordered turns
//! ├── request: RequestState             // Idle | Pending
//! ├── intent: Intent                    // tag sent with every question
//! └── status_message: String            // header status line
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{AnswerService, Intent};
use crate::core::conversation::{Conversation, ConversationTurn};
use crate::core::timestamp;

pub const GREETING: &str = "안녕하세요! 청년주택담보대출 AI 상담사입니다. 대출 한도, 금리, 필요 서류 등 궁금하신 점을 물어보세요.";

/// Lifecycle of the single outstanding request.
///
/// ```text
/// Idle ──submit──▶ Pending ──settle──▶ Idle
/// ```
///
/// Entry points are rejected, not queued, while `Pending`. There is no
/// cancellation: a request runs until the transport resolves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

pub struct App {
    pub service: Arc<dyn AnswerService>,
    pub conversation: Conversation,
    pub request: RequestState,
    pub intent: Intent,
    pub status_message: String,
}

impl App {
    /// Creates the app with the assistant's greeting as the first turn.
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        let mut conversation = Conversation::new();
        conversation.push(ConversationTurn::assistant(GREETING, timestamp::now_display()));
        Self {
            service,
            conversation,
            request: RequestState::Idle,
            intent: Intent::Informational,
            status_message: String::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.request == RequestState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::Speaker;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.request, RequestState::Idle);
        assert!(!app.is_pending());
        assert_eq!(app.intent, Intent::Informational);
        assert_eq!(app.conversation.len(), 1);
        let greeting = &app.conversation.turns()[0];
        assert_eq!(greeting.speaker, Speaker::Assistant);
        assert_eq!(greeting.text, GREETING);
    }
}
