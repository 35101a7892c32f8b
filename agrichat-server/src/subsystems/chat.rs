//! Chat flows: session start, question answering, history lookup
//!
//! Language codes are validated against the catalog before any store call,
//! so nothing is persisted for a rejected request.

use agrichat_core::models::{MESSAGE_COLLECTION, SESSION_COLLECTION};
use agrichat_core::store::{to_record, Record};
use agrichat_core::{generate_answer, ChatMessage, ChatSession, DocumentStore, Language, StoreError};
use serde_json::Value;
use thiserror::Error;

/// Maximum number of messages returned for one session.
pub const HISTORY_LIMIT: usize = 100;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn parse_language(code: &str) -> Result<Language, ChatError> {
    Language::from_code(code).ok_or_else(|| ChatError::UnsupportedLanguage(code.to_string()))
}

/// Create a session and return its id.
pub async fn start_session(store: &dyn DocumentStore, language: &str) -> Result<String, ChatError> {
    let language = parse_language(language)?;
    let record = to_record(&ChatSession { language })?;
    let session_id = store.create_document(SESSION_COLLECTION, record).await?;
    tracing::info!(%session_id, %language, "Chat session started");
    Ok(session_id)
}

/// Persist the question, generate the reply, persist the reply.
pub async fn ask(
    store: &dyn DocumentStore,
    session_id: &str,
    language: &str,
    question: &str,
) -> Result<&'static str, ChatError> {
    let language = parse_language(language)?;

    let user_msg = ChatMessage::user(session_id, question, language);
    store
        .create_document(MESSAGE_COLLECTION, to_record(&user_msg)?)
        .await?;

    let answer = generate_answer(question, language.code());

    let assistant_msg = ChatMessage::assistant(session_id, answer, language);
    store
        .create_document(MESSAGE_COLLECTION, to_record(&assistant_msg)?)
        .await?;

    tracing::info!(session_id, %language, "Answered question");
    Ok(answer)
}

/// Messages of a session, oldest first, as JSON objects with text ids.
pub async fn history(store: &dyn DocumentStore, session_id: &str) -> Result<Vec<Value>, ChatError> {
    let mut filter = Record::new();
    filter.insert("session_id".to_string(), Value::String(session_id.to_string()));

    let docs = store
        .get_documents(MESSAGE_COLLECTION, &filter, HISTORY_LIMIT)
        .await?;
    Ok(docs.into_iter().map(|doc| doc.into_json()).collect())
}
