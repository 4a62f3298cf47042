pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod markdown;
pub mod remote;
pub mod session;

// Re-export common error type
pub use error::{RagisError, Result};
