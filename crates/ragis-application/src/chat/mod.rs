//! Chat session control: transcript lifecycle, the single-in-flight send
//! path, and the debounced history autosave.

mod autosave;
mod controller;

pub use controller::{ChatController, RenderedMessage, SaveState, SearchMode};
