/// Structured assistant reply and its best-effort parser
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fallback text used whenever the assistant's output cannot be interpreted.
pub const FALLBACK_TEXT: &str = "I don't know what you mean";

/// What kind of reply the assistant produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    /// Client should navigate to a page
    Navigation,
    /// Plain conversational answer
    Question,
    /// Client should run an in-app action
    Action,
    /// Missing or unrecognized type
    #[default]
    #[serde(other)]
    Unknown,
}

/// Loosely-typed payload accompanying a reply.
///
/// Navigation replies carry `where_` + `params`; action replies carry
/// `action_name` + `params`. Fields the assistant omits stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyData {
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// The assistant's output once parsed into `{type, data, textResponse}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    #[serde(rename = "type", default)]
    pub kind: ReplyKind,
    #[serde(default)]
    pub data: ReplyData,
    #[serde(default = "fallback_text")]
    pub text_response: String,
}

fn fallback_text() -> String {
    FALLBACK_TEXT.to_string()
}

impl Default for AssistantReply {
    fn default() -> Self {
        Self {
            kind: ReplyKind::Unknown,
            data: ReplyData::default(),
            text_response: fallback_text(),
        }
    }
}

impl AssistantReply {
    /// Parse a raw assistant reply, best-effort.
    ///
    /// A leading ```` ```json ```` code fence is stripped before parsing. Any
    /// failure — empty input, non-JSON garbage, wrong shape — yields the
    /// fallback reply. This function never fails and is deterministic for a
    /// given input.
    pub fn parse(raw: &str) -> Self {
        let cleaned = strip_fence(raw);
        serde_json::from_str(cleaned.trim()).unwrap_or_default()
    }
}

/// Strip a markdown code fence wrapping the payload, if present.
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    rest.strip_suffix("```").unwrap_or(rest)
}
