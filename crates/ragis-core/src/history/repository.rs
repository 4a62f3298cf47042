//! History repository port.

use async_trait::async_trait;

use super::store::HistoryStore;
use crate::error::Result;

/// An abstract repository for the persisted chat history.
///
/// This trait defines the contract for loading and persisting the bounded
/// history collection, decoupling the chat services from the storage
/// mechanism. Every mutation path is expected to re-load, apply the change,
/// and persist (read-modify-write); the store itself has no background
/// flush. Concurrent writers are last-write-wins by design.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the persisted store.
    ///
    /// Never fails: a missing or undecodable slice degrades to an empty
    /// store (with a logged warning), and entries past the age bound are
    /// swept, the swept result being written back so a second load yields
    /// the same set.
    async fn load(&self) -> HistoryStore;

    /// Persists the full store.
    ///
    /// Callers are expected to log and continue on failure; a storage
    /// failure must never surface as a user-visible crash.
    async fn persist(&self, store: &HistoryStore) -> Result<()>;
}
