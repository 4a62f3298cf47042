//! Chat transcript domain types.
//!
//! The transcript is the ordered sequence of turns in the active session.
//! It is append-only while the session lives, with one exception: the
//! pending assistant placeholder is rewritten in place when the remote
//! response (or a transport error) arrives.

mod message;
mod transcript;

pub use message::{ChatMessage, Sender};
pub use transcript::{Transcript, WELCOME_MESSAGE};
