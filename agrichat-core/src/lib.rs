pub mod answer;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use answer::{classify, generate_answer, Topic};
pub use catalog::{is_supported, supported_codes, system_prompt, Language};
pub use config::AgriConfig;
pub use error::AgriError;
pub use models::{ChatMessage, ChatSession, Role};
pub use store::{DocumentStore, MemoryDocumentStore, PgDocumentStore, StoreError, StoredDocument};
