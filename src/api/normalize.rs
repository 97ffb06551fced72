//! # Answer Normalization
//!
//! Turns a [`RemoteAnswer`] into the single display string shown in the
//! assistant bubble. The server fills different fields depending on how it
//! produced the answer, so the payload is classified into an [`Answer`] by a
//! fixed precedence chain:
//!
//! ```text
//! 1. text fields      answer → content → message → output → text → response
//! 2. numeric result   result (+ currency, explanation, params)
//! 3. metadata         first assistant message (+ numbered sources)
//! 4. unrecognized     fixed message chosen by the request's intent
//! ```
//!
//! The order mirrors how the server actually fills the fields. Do not reorder it.

use serde_json::{Number, Value};

use super::types::{Intent, RemoteAnswer};

pub const NOT_FOUND_MESSAGE: &str =
    "요청하신 정보를 찾지 못했습니다. 질문을 조금 더 구체적으로 입력해 주세요.";
pub const CALCULATION_UNREADABLE_MESSAGE: &str =
    "계산 결과를 해석하지 못했습니다. 입력하신 조건을 다시 확인해 주세요.";
pub const UNREADABLE_MESSAGE: &str =
    "응답을 이해하지 못했습니다. 잠시 후 다시 시도해 주세요.";

/// A payload classified by the first rule of the precedence chain that matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Every non-empty text field, trimmed, in precedence order.
    Text(Vec<String>),
    Calculation {
        result: Number,
        currency: Option<String>,
        explanation: Option<String>,
        params: Option<Value>,
    },
    /// Assistant reply recovered from `metadata.messages`, plus cited sources.
    Assistant {
        content: Option<String>,
        sources: Vec<String>,
    },
    Unrecognized(Intent),
}

impl Answer {
    pub fn classify(payload: &RemoteAnswer, intent: Intent) -> Self {
        let texts: Vec<String> = payload
            .texts
            .iter()
            .map(|(_, s)| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !texts.is_empty() {
            return Answer::Text(texts);
        }

        if let Some(result) = &payload.result {
            return Answer::Calculation {
                result: result.clone(),
                currency: non_empty(payload.currency.as_deref()),
                explanation: non_empty(payload.explanation.as_deref()),
                params: payload.params.clone(),
            };
        }

        let content = payload.metadata.as_ref().and_then(|meta| {
            let first = meta.messages.iter().find(|m| m.role == "assistant")?;
            non_empty(first.content.as_deref())
        });
        let sources: Vec<String> = payload
            .sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if content.is_some() || !sources.is_empty() {
            return Answer::Assistant { content, sources };
        }

        Answer::Unrecognized(intent)
    }

    /// Renders the display string for the assistant bubble.
    pub fn render(&self) -> String {
        match self {
            Answer::Text(texts) => texts.join("\n\n"),
            Answer::Calculation {
                result,
                currency,
                explanation,
                params,
            } => {
                let mut parts = vec![format!(
                    "계산 결과: {}{}",
                    format_number(result),
                    currency.as_deref().unwrap_or("")
                )];
                if let Some(explanation) = explanation {
                    parts.push(format!("설명: {explanation}"));
                }
                if let Some(params) = params {
                    parts.push(format!("적용된 조건: {params}"));
                }
                parts.join(" ")
            }
            Answer::Assistant { content, sources } => {
                let mut parts = Vec::new();
                if let Some(content) = content {
                    parts.push(content.clone());
                }
                if !sources.is_empty() {
                    parts.push(format_sources(sources));
                }
                parts.join("\n\n")
            }
            Answer::Unrecognized(intent) => unrecognized_message(*intent).to_string(),
        }
    }
}

/// Normalizes a payload into display text.
pub fn normalize_answer(payload: &RemoteAnswer, intent: Intent) -> String {
    Answer::classify(payload, intent).render()
}

pub fn unrecognized_message(intent: Intent) -> &'static str {
    match intent {
        Intent::Informational => NOT_FOUND_MESSAGE,
        Intent::Calculational => CALCULATION_UNREADABLE_MESSAGE,
        Intent::Unknown => UNREADABLE_MESSAGE,
    }
}

fn format_sources(sources: &[String]) -> String {
    let list: Vec<String> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect();
    format!("참고 자료:\n{}", list.join("\n"))
}

/// Integral floats print without a fractional part (`500000.0` → `500000`).
fn format_number(n: &Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f >= i64::MIN as f64
        && f < i64::MAX as f64
    {
        return (f as i64).to_string();
    }
    n.to_string()
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value, intent: Intent) -> String {
        normalize_answer(&RemoteAnswer::from_value(&value), intent)
    }

    #[test]
    fn test_answer_field_returned_verbatim() {
        let text = normalize(json!({ "answer": "최대 4억원까지 가능합니다." }), Intent::Informational);
        assert_eq!(text, "최대 4억원까지 가능합니다.");
    }

    #[test]
    fn test_blank_earlier_fields_are_skipped() {
        let text = normalize(
            json!({ "answer": "   ", "content": "", "message": "금리는 연 3.0%입니다." }),
            Intent::Informational,
        );
        assert_eq!(text, "금리는 연 3.0%입니다.");
    }

    #[test]
    fn test_multiple_text_fields_joined_in_fixed_order() {
        let text = normalize(
            json!({ "response": "셋째", "answer": "첫째", "output": "둘째" }),
            Intent::Informational,
        );
        assert_eq!(text, "첫째\n\n둘째\n\n셋째");
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let text = normalize(json!({ "text": "  안녕하세요 \n" }), Intent::Informational);
        assert_eq!(text, "안녕하세요");
    }

    #[test]
    fn test_text_wins_over_result() {
        let text = normalize(json!({ "result": 1, "content": "설명 우선" }), Intent::Calculational);
        assert_eq!(text, "설명 우선");
    }

    #[test]
    fn test_result_with_currency_only() {
        let text = normalize(json!({ "result": 500000, "currency": "KRW" }), Intent::Calculational);
        assert!(text.contains("500000"));
        assert!(text.contains("KRW"));
        assert!(!text.contains("설명"));
        assert!(!text.contains("적용된 조건"));
        assert_eq!(text, "계산 결과: 500000KRW");
    }

    #[test]
    fn test_integral_float_result_prints_as_integer() {
        let text = normalize(json!({ "result": 500000.0, "currency": "KRW" }), Intent::Calculational);
        assert_eq!(text, "계산 결과: 500000KRW");
    }

    #[test]
    fn test_large_integer_result_is_exact() {
        let text = normalize(json!({ "result": 9007199254740993u64 }), Intent::Calculational);
        assert_eq!(text, "계산 결과: 9007199254740993");
    }

    #[test]
    fn test_result_without_currency() {
        let text = normalize(json!({ "result": 3.5 }), Intent::Calculational);
        assert_eq!(text, "계산 결과: 3.5");
    }

    #[test]
    fn test_result_with_explanation_and_params() {
        let text = normalize(
            json!({
                "result": 1250000,
                "currency": "원",
                "explanation": "월 상환액입니다.",
                "params": { "rate": 3.5 },
            }),
            Intent::Calculational,
        );
        assert_eq!(
            text,
            "계산 결과: 1250000원 설명: 월 상환액입니다. 적용된 조건: {\"rate\":3.5}"
        );
    }

    #[test]
    fn test_blank_explanation_is_omitted() {
        let text = normalize(json!({ "result": 7, "explanation": "  " }), Intent::Calculational);
        assert_eq!(text, "계산 결과: 7");
    }

    #[test]
    fn test_metadata_assistant_message_with_sources() {
        let text = normalize(
            json!({
                "sources": ["주택도시기금", "국토교통부"],
                "metadata": {
                    "messages": [
                        { "role": "user", "content": "질문" },
                        { "role": "assistant", "content": " 답변입니다. " },
                        { "role": "assistant", "content": "두 번째" },
                    ],
                },
            }),
            Intent::Informational,
        );
        assert_eq!(text, "답변입니다.\n\n참고 자료:\n1. 주택도시기금\n2. 국토교통부");
    }

    #[test]
    fn test_metadata_uses_first_assistant_message_only() {
        let text = normalize(
            json!({
                "metadata": {
                    "messages": [
                        { "role": "assistant", "content": "   " },
                        { "role": "assistant", "content": "나중 답변" },
                    ],
                },
            }),
            Intent::Informational,
        );
        // First assistant entry is blank, so the chain falls through.
        assert_eq!(text, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_metadata_first_assistant_without_string_content_falls_through() {
        let text = normalize(
            json!({
                "metadata": {
                    "messages": [
                        { "role": "assistant", "content": null },
                        { "role": "assistant", "content": "나중 답변" },
                    ],
                },
            }),
            Intent::Informational,
        );
        assert_eq!(text, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_sources_alone_are_listed() {
        let text = normalize(json!({ "sources": ["주택도시기금"] }), Intent::Informational);
        assert_eq!(text, "참고 자료:\n1. 주택도시기금");
    }

    #[test]
    fn test_unrecognized_by_intent() {
        assert_eq!(normalize(json!({}), Intent::Informational), NOT_FOUND_MESSAGE);
        assert_eq!(
            normalize(json!({}), Intent::Calculational),
            CALCULATION_UNREADABLE_MESSAGE
        );
        assert_eq!(normalize(json!({ "foo": "bar" }), Intent::Unknown), UNREADABLE_MESSAGE);
    }

    #[test]
    fn test_classify_variants() {
        let payload = RemoteAnswer::from_value(&json!({ "result": 2 }));
        assert!(matches!(
            Answer::classify(&payload, Intent::Informational),
            Answer::Calculation { currency: None, .. }
        ));
        let payload = RemoteAnswer::from_value(&json!({}));
        assert_eq!(
            Answer::classify(&payload, Intent::Unknown),
            Answer::Unrecognized(Intent::Unknown)
        );
    }
}
