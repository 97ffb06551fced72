//! # Conversation
//!
//! The ordered list of turns shown in the message list.
//!
//! Turns are only ever appended. The single exception is the provisional
//! assistant turn created when a request is dispatched: once the request
//! settles, that turn is resolved in place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub display_time: String,
    /// Suggested follow-up questions, rendered as chips under assistant turns.
    pub follow_ups: Vec<String>,
    /// Sentence shown above the chips.
    pub follow_up_prompt: Option<String>,
    /// True while this assistant turn is a placeholder for an in-flight request.
    pub pending: bool,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>, display_time: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            display_time: display_time.into(),
            follow_ups: Vec::new(),
            follow_up_prompt: None,
            pending: false,
        }
    }

    pub fn assistant(text: impl Into<String>, display_time: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            ..Self::user(text, display_time)
        }
    }

    pub fn placeholder(text: impl Into<String>, display_time: impl Into<String>) -> Self {
        Self {
            pending: true,
            ..Self::assistant(text, display_time)
        }
    }

    pub fn with_follow_ups(mut self, follow_ups: Vec<String>, prompt: Option<String>) -> Self {
        self.follow_ups = follow_ups;
        self.follow_up_prompt = prompt;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Replaces the most recent pending assistant turn with its resolved text.
    ///
    /// Returns `false` if there is no pending turn to resolve.
    pub fn resolve_pending(&mut self, text: String, display_time: String) -> bool {
        let Some(turn) = self
            .turns
            .iter_mut()
            .rev()
            .find(|t| t.speaker == Speaker::Assistant && t.pending)
        else {
            return false;
        };
        turn.text = text;
        turn.display_time = display_time;
        turn.pending = false;
        true
    }

    /// The newest assistant turn carrying follow-up chips, if it is also the
    /// newest assistant turn overall. Older chips stay visible but inactive.
    pub fn active_follow_ups(&self) -> Option<(usize, &ConversationTurn)> {
        let (idx, turn) = self
            .turns
            .iter()
            .enumerate()
            .rev()
            .find(|(_, t)| t.speaker == Speaker::Assistant)?;
        (!turn.follow_ups.is_empty()).then_some((idx, turn))
    }
}
