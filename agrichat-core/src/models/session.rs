use serde::{Deserialize, Serialize};

use crate::catalog::Language;

/// A chat session as written to the `chatsession` collection.
///
/// The session id is the document id the store assigns on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub language: Language,
}
