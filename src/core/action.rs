//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The server answers? That's `Action::AnswerReceived(payload)`.
//!
//! `update()` applies an action to the state and returns an [`Effect`]
//! describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Local;
use log::{debug, info, warn};

use crate::api::{ChatRequest, RemoteAnswer, ServiceError, normalize_answer};
use crate::core::conversation::ConversationTurn;
use crate::core::quick_actions::{FOLLOW_UP_PROMPT, QUICK_ACTIONS};
use crate::core::state::{App, RequestState};
use crate::core::timestamp;

pub const PREPARING_MESSAGE: &str = "답변을 준비하고 있습니다...";
pub const ERROR_PREFIX: &str = "죄송합니다. 답변을 불러오는 중 오류가 발생했습니다.";
pub const DEFAULT_ERROR_MESSAGE: &str =
    "죄송합니다. 답변을 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";
pub const WAITING_STATUS: &str = "답변을 기다리는 중...";
pub const FAILED_STATUS: &str = "요청 실패";

#[derive(Debug)]
pub enum Action {
    /// Free-form text from the input box.
    Submit(String),
    /// FAQ entry selected, by index into `QUICK_ACTIONS`.
    QuickAction(usize),
    /// Follow-up chip clicked.
    FollowUp(String),
    /// The request settled with a payload.
    AnswerReceived(RemoteAnswer),
    /// The request failed; carries the error's message (possibly empty).
    RequestFailed(String),
    Quit,
}

impl Action {
    /// Converts the outcome of a request into the action that settles it.
    pub fn settle(result: Result<RemoteAnswer, ServiceError>) -> Self {
        match result {
            Ok(payload) => Action::AnswerReceived(payload),
            Err(e) => Action::RequestFailed(e.to_string()),
        }
    }
}

/// Side effects requested by `update`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly one request to the chat service.
    SpawnRequest(ChatRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit_user_message(app, &text),
        Action::FollowUp(question) => {
            if app.is_pending() {
                debug!("Follow-up ignored while a request is pending");
                return Effect::None;
            }
            submit_user_message(app, &question)
        }
        Action::QuickAction(index) => {
            handle_quick_action(app, index);
            Effect::None
        }
        Action::AnswerReceived(payload) => {
            if !app.is_pending() {
                warn!("Answer arrived with no pending request; dropping it");
                return Effect::None;
            }
            let text = normalize_answer(&payload, app.intent);
            let time = timestamp::display_time_or(payload.generated_at(), Local::now());
            app.conversation.resolve_pending(text, time);
            app.request = RequestState::Idle;
            app.status_message.clear();
            info!("Request settled with an answer");
            Effect::None
        }
        Action::RequestFailed(message) => {
            if !app.is_pending() {
                warn!("Failure arrived with no pending request; dropping it");
                return Effect::None;
            }
            warn!("Request failed: {}", message);
            app.conversation
                .resolve_pending(error_text(&message), timestamp::now_display());
            app.request = RequestState::Idle;
            app.status_message = FAILED_STATUS.to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit_user_message(app: &mut App, text: &str) -> Effect {
    if app.is_pending() {
        debug!("Submit ignored while a request is pending");
        return Effect::None;
    }
    let message = text.trim();
    if message.is_empty() {
        return Effect::None;
    }

    let now = timestamp::now_display();
    app.conversation
        .push(ConversationTurn::user(message, now.clone()));
    app.conversation
        .push(ConversationTurn::placeholder(PREPARING_MESSAGE, now));
    app.request = RequestState::Pending;
    app.status_message = WAITING_STATUS.to_string();

    info!("Dispatching question (len={})", message.len());
    Effect::SpawnRequest(ChatRequest {
        message: message.to_string(),
        intent: app.intent,
        category: None,
        params: None,
    })
}

fn handle_quick_action(app: &mut App, index: usize) {
    if app.is_pending() {
        debug!("Quick action ignored while a request is pending");
        return;
    }
    let Some(action) = QUICK_ACTIONS.get(index) else {
        warn!("Unknown quick action index {}", index);
        return;
    };

    let now = timestamp::now_display();
    app.conversation
        .push(ConversationTurn::user(action.prompt, now.clone()));
    app.conversation.push(
        ConversationTurn::assistant(action.answer, now)
            .with_follow_ups(action.follow_up_list(), Some(FOLLOW_UP_PROMPT.to_string())),
    );
    info!("Answered quick action '{}' locally", action.title);
}

fn error_text(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        format!("{ERROR_PREFIX} ({message})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Intent;
    use crate::api::normalize::{CALCULATION_UNREADABLE_MESSAGE, NOT_FOUND_MESSAGE};
    use crate::core::conversation::Speaker;
    use crate::test_support::test_app;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RemoteAnswer {
        RemoteAnswer::from_value(&value)
    }

    #[test]
    fn test_submit_appends_user_and_placeholder() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("  한도가 궁금해요  ".to_string()));

        assert_eq!(
            effect,
            Effect::SpawnRequest(ChatRequest::informational("한도가 궁금해요"))
        );
        assert_eq!(app.request, RequestState::Pending);
        assert_eq!(app.status_message, WAITING_STATUS);

        let turns = app.conversation.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker, Speaker::User);
        assert_eq!(turns[1].text, "한도가 궁금해요");
        assert_eq!(turns[2].speaker, Speaker::Assistant);
        assert_eq!(turns[2].text, PREPARING_MESSAGE);
        assert!(turns[2].pending);
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit("   \n".to_string())), Effect::None);
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.request, RequestState::Idle);
    }

    #[test]
    fn test_second_submit_while_pending_is_rejected() {
        let mut app = test_app();
        let first = update(&mut app, Action::Submit("첫 질문".to_string()));
        assert!(matches!(first, Effect::SpawnRequest(_)));

        let second = update(&mut app, Action::Submit("두 번째 질문".to_string()));
        assert_eq!(second, Effect::None);
        assert_eq!(app.conversation.len(), 3);
    }

    #[test]
    fn test_answer_replaces_placeholder() {
        let mut app = test_app();
        update(&mut app, Action::Submit("금리".to_string()));
        let effect = update(
            &mut app,
            Action::AnswerReceived(payload(json!({
                "answer": "연 3.0%~4.5%입니다.",
                "metadata": { "generated_at": "2026-10-19T14:05:00" },
            }))),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.request, RequestState::Idle);
        assert!(app.status_message.is_empty());
        let last = app.conversation.turns().last().unwrap();
        assert_eq!(last.text, "연 3.0%~4.5%입니다.");
        assert_eq!(last.display_time, "오후 02:05");
        assert!(!last.pending);
        assert_eq!(app.conversation.len(), 3);
    }

    #[test]
    fn test_unrecognized_answer_uses_intent_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit("질문".to_string()));
        update(&mut app, Action::AnswerReceived(payload(json!({}))));
        assert_eq!(app.conversation.turns()[2].text, NOT_FOUND_MESSAGE);

        app.intent = Intent::Calculational;
        update(&mut app, Action::Submit("계산".to_string()));
        update(&mut app, Action::AnswerReceived(payload(json!({ "foo": 1 }))));
        assert_eq!(app.conversation.turns()[4].text, CALCULATION_UNREADABLE_MESSAGE);
    }

    #[test]
    fn test_failure_embeds_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit("질문".to_string()));
        update(
            &mut app,
            Action::RequestFailed("서버 응답 오류 (HTTP 500)".to_string()),
        );

        assert_eq!(app.request, RequestState::Idle);
        assert_eq!(app.status_message, FAILED_STATUS);
        let last = app.conversation.turns().last().unwrap();
        assert!(last.text.starts_with(ERROR_PREFIX));
        assert!(last.text.contains("HTTP 500"));
        assert!(!last.pending);
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let mut app = test_app();
        update(&mut app, Action::Submit("질문".to_string()));
        update(&mut app, Action::RequestFailed(String::new()));
        assert_eq!(
            app.conversation.turns().last().unwrap().text,
            DEFAULT_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_settle_while_idle_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::AnswerReceived(payload(json!({ "answer": "유령" }))));
        update(&mut app, Action::RequestFailed("late".to_string()));
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.request, RequestState::Idle);
    }

    #[test]
    fn test_quick_action_answers_locally() {
        let mut app = test_app();
        let effect = update(&mut app, Action::QuickAction(0));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.request, RequestState::Idle);
        let turns = app.conversation.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker, Speaker::User);
        assert_eq!(turns[1].text, QUICK_ACTIONS[0].prompt);
        assert_eq!(turns[2].text, QUICK_ACTIONS[0].answer);
        assert_eq!(turns[2].follow_ups, QUICK_ACTIONS[0].follow_up_list());
        assert_eq!(turns[2].follow_up_prompt.as_deref(), Some(FOLLOW_UP_PROMPT));
    }

    #[test]
    fn test_quick_action_out_of_range_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::QuickAction(QUICK_ACTIONS.len()));
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_quick_action_and_follow_up_blocked_while_pending() {
        let mut app = test_app();
        update(&mut app, Action::Submit("질문".to_string()));
        assert_eq!(update(&mut app, Action::QuickAction(1)), Effect::None);
        assert_eq!(
            update(&mut app, Action::FollowUp("금리 우대 조건을 알려주세요".to_string())),
            Effect::None
        );
        assert_eq!(app.conversation.len(), 3);
    }

    #[test]
    fn test_quick_action_then_follow_up_turn_counts() {
        let mut app = test_app();
        let base = app.conversation.len();

        update(&mut app, Action::QuickAction(1));
        assert_eq!(app.conversation.len(), base + 2);

        let question = app.conversation.turns().last().unwrap().follow_ups[1].clone();
        let effect = update(&mut app, Action::FollowUp(question.clone()));
        assert_eq!(effect, Effect::SpawnRequest(ChatRequest::informational(question)));
        assert_eq!(app.conversation.len(), base + 4);

        update(&mut app, Action::AnswerReceived(payload(json!({ "content": "우대 조건 안내" }))));
        assert_eq!(app.conversation.len(), base + 4);
        assert_eq!(app.conversation.turns().last().unwrap().text, "우대 조건 안내");
    }

    #[test]
    fn test_settle_maps_results() {
        let ok = Action::settle(Ok(RemoteAnswer::default()));
        assert!(matches!(ok, Action::AnswerReceived(_)));

        let err = Action::settle(Err(ServiceError::Http {
            status: 404,
            body: String::new(),
        }));
        match err {
            Action::RequestFailed(msg) => assert!(msg.contains("404")),
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
