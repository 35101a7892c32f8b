//! AgriChat HTTP API
//!
//! Axum server exposing chat sessions and canned agricultural answers.
//!
//! Each endpoint has a thin axum handler that delegates to an inner function
//! returning `(StatusCode, serde_json::Value)`. The inner functions take the
//! store as a plain argument and are tested without axum dispatch.
//!
//! Endpoints:
//! - GET  /                  — liveness message
//! - GET  /test              — document store status probe
//! - GET  /languages         — supported language codes
//! - POST /chat/start        — create a chat session
//! - GET  /chat/:session_id  — message history of a session
//! - POST /chat/ask          — answer a question and record both turns

use std::sync::Arc;

use agrichat_core::{supported_codes, AgriConfig, DocumentStore, StoreError};
use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::subsystems::chat::{self, ChatError};
use crate::subsystems::probe;

/// Shared state for all HTTP handlers.
///
/// `store` is `None` when no document store could be initialized; the
/// status probe reports that and chat endpoints answer 503.
#[derive(Clone)]
pub struct HttpState {
    pub store: Option<Arc<dyn DocumentStore>>,
    pub config: AgriConfig,
}

impl HttpState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: AgriConfig) -> Self {
        Self { store, config }
    }

    fn store(&self) -> Option<&dyn DocumentStore> {
        self.store.as_deref()
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/test", get(test_handler))
        .route("/languages", get(languages_handler))
        .route("/chat/start", post(start_handler))
        .route("/chat/ask", post(ask_handler))
        .route("/chat/:session_id", get(history_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: HttpState,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = state.config.listen_addr();
    let app = build_router(Arc::new(state));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("AgriChat HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub session_id: String,
    pub language: String,
    pub question: String,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            detail: msg.into(),
            status: "error".to_string(),
        }
    }

    fn into_body(self, code: StatusCode) -> (StatusCode, serde_json::Value) {
        let body = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        (code, body)
    }
}

// ============================================================================
// Inner (directly testable) functions
// ============================================================================

pub fn root_inner() -> serde_json::Value {
    serde_json::json!({ "message": "AI Agri Chatbot Backend Running" })
}

pub fn languages_inner() -> serde_json::Value {
    serde_json::json!({ "languages": supported_codes() })
}

/// Store status probe. Always 200; problems are reported in the body.
pub async fn test_inner(
    store: Option<&dyn DocumentStore>,
    config: &AgriConfig,
) -> (StatusCode, serde_json::Value) {
    let status = probe::probe_store(store, &config.database).await;
    match serde_json::to_value(status) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (
            StatusCode::OK,
            serde_json::json!({ "backend": "✅ Running", "database": format!("❌ Error: {}", e) }),
        ),
    }
}

pub async fn start_inner(
    store: Option<&dyn DocumentStore>,
    req: StartRequest,
) -> (StatusCode, serde_json::Value) {
    if let Err(e) = chat::parse_language(&req.language) {
        return chat_error_response(e);
    }
    let store = match store {
        Some(s) => s,
        None => return store_missing_response(),
    };

    match chat::start_session(store, &req.language).await {
        Ok(session_id) => (
            StatusCode::OK,
            serde_json::json!({ "session_id": session_id }),
        ),
        Err(e) => chat_error_response(e),
    }
}

pub async fn ask_inner(
    store: Option<&dyn DocumentStore>,
    req: AskRequest,
) -> (StatusCode, serde_json::Value) {
    if let Err(e) = chat::parse_language(&req.language) {
        return chat_error_response(e);
    }
    let store = match store {
        Some(s) => s,
        None => return store_missing_response(),
    };

    match chat::ask(store, &req.session_id, &req.language, &req.question).await {
        Ok(answer) => (StatusCode::OK, serde_json::json!({ "answer": answer })),
        Err(e) => chat_error_response(e),
    }
}

pub async fn history_inner(
    store: Option<&dyn DocumentStore>,
    session_id: &str,
) -> (StatusCode, serde_json::Value) {
    let store = match store {
        Some(s) => s,
        None => return store_missing_response(),
    };

    match chat::history(store, session_id).await {
        Ok(messages) => (StatusCode::OK, serde_json::json!({ "messages": messages })),
        Err(e) => chat_error_response(e),
    }
}

// ============================================================================
// Axum handler wrappers (thin, delegate to inner functions)
// ============================================================================

pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(root_inner()))
}

pub async fn test_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = test_inner(state.store(), &state.config).await;
    (status, Json(body))
}

pub async fn languages_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(languages_inner()))
}

pub async fn start_handler(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = match payload {
        Ok(Json(req)) => start_inner(state.store(), req).await,
        Err(rejection) => rejection_response(rejection),
    };
    (status, Json(body))
}

pub async fn ask_handler(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = match payload {
        Ok(Json(req)) => ask_inner(state.store(), req).await,
        Err(rejection) => rejection_response(rejection),
    };
    (status, Json(body))
}

pub async fn history_handler(
    State(state): State<Arc<HttpState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let (status, body) = history_inner(state.store(), &session_id).await;
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

/// Map a chat failure onto an HTTP status and error body.
pub fn chat_error_response(e: ChatError) -> (StatusCode, serde_json::Value) {
    match e {
        ChatError::UnsupportedLanguage(code) => {
            tracing::debug!(%code, "Rejected unsupported language");
            ErrorResponse::new("Unsupported language code").into_body(StatusCode::BAD_REQUEST)
        }
        ChatError::Store(StoreError::Unavailable(msg)) => {
            tracing::error!("Document store unavailable: {}", msg);
            ErrorResponse::new(format!("Document store unavailable: {}", msg))
                .into_body(StatusCode::SERVICE_UNAVAILABLE)
        }
        ChatError::Store(other) => {
            tracing::error!("Document store error: {}", other);
            ErrorResponse::new(other.to_string()).into_body(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Malformed or incomplete request bodies keep axum's status code but use the
/// common error body.
pub fn rejection_response(rejection: JsonRejection) -> (StatusCode, serde_json::Value) {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ErrorResponse::new(rejection.body_text()).into_body(rejection.status())
}

fn store_missing_response() -> (StatusCode, serde_json::Value) {
    ErrorResponse::new("Database not available").into_body(StatusCode::SERVICE_UNAVAILABLE)
}

// ============================================================================
// Unit Tests: call inner functions directly
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agrichat_core::MemoryDocumentStore;

    fn ask_req(session_id: &str, language: &str, question: &str) -> AskRequest {
        AskRequest {
            session_id: session_id.to_string(),
            language: language.to_string(),
            question: question.to_string(),
        }
    }

    #[test]
    fn test_root_inner_liveness() {
        assert_eq!(root_inner()["message"], "AI Agri Chatbot Backend Running");
    }

    #[test]
    fn test_languages_inner_sorted() {
        let v = languages_inner();
        let codes: Vec<&str> = v["languages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(codes, sorted);
        assert_eq!(codes.len(), 10);
    }

    #[tokio::test]
    async fn test_start_inner_rejects_unsupported_language() {
        let store = MemoryDocumentStore::new();
        let (status, body) = start_inner(
            Some(&store as &dyn DocumentStore),
            StartRequest {
                language: "fr".to_string(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Unsupported language code");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unsupported_language_wins_over_missing_store() {
        let (status, _) = ask_inner(None, ask_req("s", "xx", "soil")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_store_is_503() {
        let (status, body) = start_inner(
            None,
            StartRequest {
                language: "en".to_string(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");

        let (status, _) = history_inner(None, "s").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ask_then_history_inner() {
        let store = MemoryDocumentStore::new();
        let (status, body) = ask_inner(Some(&store as &dyn DocumentStore), ask_req("s-9", "te", "pest attack")).await;
        assert_eq!(status, StatusCode::OK);
        let answer = body["answer"].as_str().unwrap().to_string();
        assert!(answer.starts_with("పురుగు నిర్వహణ"));

        let (status, body) = history_inner(Some(&store as &dyn DocumentStore), "s-9").await;
        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["content"], answer.as_str());
    }

    #[tokio::test]
    async fn test_history_inner_unknown_session_is_empty() {
        let store = MemoryDocumentStore::new();
        let (status, body) = history_inner(Some(&store as &dyn DocumentStore), "unknown-session-id").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "messages": [] }));
    }

    #[test]
    fn test_store_errors_map_to_status_codes() {
        let (status, _) = chat_error_response(ChatError::Store(StoreError::Unavailable(
            "connection refused".to_string(),
        )));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = chat_error_response(ChatError::Store(StoreError::InvalidRecord(
            "bad".to_string(),
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("bad"));
    }
}
