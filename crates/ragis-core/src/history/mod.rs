//! Bounded, time-windowed local chat history.
//!
//! The store keeps at most [`HISTORY_CAPACITY`] saved conversations and
//! drops anything older than [`MAX_AGE_HOURS`] on load. All collection
//! operations here are pure; durability lives behind the
//! [`HistoryRepository`] port.

mod model;
mod repository;
mod store;

pub use model::{HistoryEntry, PREVIEW_FALLBACK, PREVIEW_MAX_CHARS};
pub use repository::HistoryRepository;
pub use store::{HistoryStore, HISTORY_CAPACITY, MAX_AGE_HOURS};
