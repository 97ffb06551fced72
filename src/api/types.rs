use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Intent category declared with a chat request.
///
/// The server may answer informational and calculational questions through
/// different fields, so the fallback text for an unreadable answer depends on it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Informational,
    Calculational,
    Unknown,
}

/// Request body for `POST /api/chat`.
///
/// `category` and `params` are always sent, as explicit `null` when unset.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub intent: Intent,
    pub category: Option<String>,
    pub params: Option<Value>,
}

impl ChatRequest {
    /// A free-form question from the user, tagged informational.
    pub fn informational(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            intent: Intent::Informational,
            category: None,
            params: None,
        }
    }
}

/// Text-bearing fields of the answer payload, in precedence order.
pub const TEXT_FIELDS: [&str; 6] = ["answer", "content", "message", "output", "text", "response"];

/// A role-tagged message from `metadata.messages`.
///
/// Entries keep their position even when `content` is missing or not a
/// string, so "first assistant message" means the first one the server sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMessage {
    pub role: String,
    pub content: Option<String>,
}

/// The `metadata` object of an answer payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMetadata {
    pub generated_at: Option<String>,
    pub messages: Vec<RoleMessage>,
}

/// Validated view of the chat endpoint's response body.
///
/// The producer guarantees nothing about the shape, so every field is probed
/// on read: a field holding the wrong JSON type is treated as absent instead
/// of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteAnswer {
    /// `(field name, raw value)` for each string-valued text field, in [`TEXT_FIELDS`] order.
    pub texts: Vec<(&'static str, String)>,
    pub result: Option<Number>,
    pub currency: Option<String>,
    pub explanation: Option<String>,
    pub params: Option<Value>,
    pub sources: Vec<String>,
    pub metadata: Option<AnswerMetadata>,
}

impl RemoteAnswer {
    /// Reads a payload out of arbitrary JSON. Non-object values yield an empty answer.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let texts = TEXT_FIELDS
            .iter()
            .filter_map(|&field| string_field(obj, field).map(|s| (field, s)))
            .collect();

        let sources = obj
            .get("sources")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let params = obj.get("params").filter(|v| !v.is_null()).cloned();

        Self {
            texts,
            result: obj.get("result").and_then(Value::as_number).cloned(),
            currency: string_field(obj, "currency"),
            explanation: string_field(obj, "explanation"),
            params,
            sources,
            metadata: obj
                .get("metadata")
                .and_then(Value::as_object)
                .map(read_metadata),
        }
    }

    /// Server-side generation timestamp, if the payload carries one.
    pub fn generated_at(&self) -> Option<&str> {
        self.metadata.as_ref()?.generated_at.as_deref()
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn read_metadata(obj: &Map<String, Value>) -> AnswerMetadata {
    let messages = obj
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|m| {
                    Some(RoleMessage {
                        role: string_field(m, "role")?,
                        content: string_field(m, "content"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    AnswerMetadata {
        generated_at: string_field(obj, "generated_at"),
        messages,
    }
}
