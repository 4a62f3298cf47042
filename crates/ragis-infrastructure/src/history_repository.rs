//! File-backed history repository.

use async_trait::async_trait;
use chrono::Utc;

use ragis_core::error::Result;
use ragis_core::history::{HistoryRepository, HistoryStore};

use crate::paths::RagisPaths;
use crate::storage::AtomicJsonFile;

/// Stores the bounded chat history as one JSON document.
///
/// Loading is self-healing: malformed content degrades to an empty store,
/// and entries past the age bound are swept with the swept result written
/// back, so two consecutive loads yield the same set.
pub struct FileHistoryRepository {
    file: AtomicJsonFile<HistoryStore>,
}

impl FileHistoryRepository {
    pub fn new(paths: &RagisPaths) -> Self {
        Self {
            file: AtomicJsonFile::new(paths.history_file()),
        }
    }
}

#[async_trait]
impl HistoryRepository for FileHistoryRepository {
    async fn load(&self) -> HistoryStore {
        let mut store = match self.file.load() {
            Ok(Some(store)) => store,
            Ok(None) => return HistoryStore::new(),
            Err(e) => {
                tracing::warn!(
                    "Discarding undecodable history at {:?}: {}",
                    self.file.path(),
                    e
                );
                return HistoryStore::new();
            }
        };

        let swept = store.prune_expired(Utc::now());
        if swept > 0 {
            tracing::debug!("Swept {} expired history entries on load", swept);
            if let Err(e) = self.file.save(&store) {
                tracing::warn!("Failed to persist history sweep: {}", e);
            }
        }

        store
    }

    async fn persist(&self, store: &HistoryStore) -> Result<()> {
        self.file.save(store)
    }
}
