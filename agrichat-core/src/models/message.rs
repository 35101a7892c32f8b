use serde::{Deserialize, Serialize};

use crate::catalog::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a conversation in the `chatmessage` collection.
///
/// `created_at` is stamped by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub language: Language,
}

impl ChatMessage {
    pub fn user(session_id: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            session_id: session_id.into(),
            role: Role::User,
            content: content.into(),
            language,
        }
    }

    pub fn assistant(
        session_id: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            role: Role::Assistant,
            content: content.into(),
            language,
        }
    }
}
