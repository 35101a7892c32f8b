pub mod chat;
pub mod probe;
