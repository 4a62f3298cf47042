//! Storage primitives shared by the file-backed repositories.

mod atomic_json;

pub use atomic_json::AtomicJsonFile;
