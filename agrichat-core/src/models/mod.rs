pub mod message;
pub mod session;

pub use message::{ChatMessage, Role};
pub use session::ChatSession;

pub const SESSION_COLLECTION: &str = "chatsession";
pub const MESSAGE_COLLECTION: &str = "chatmessage";
