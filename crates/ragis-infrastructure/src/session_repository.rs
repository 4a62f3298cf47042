//! File-backed session repository.

use async_trait::async_trait;

use ragis_core::error::Result;
use ragis_core::session::{AuthSession, SessionRepository};

use crate::paths::RagisPaths;
use crate::storage::AtomicJsonFile;

/// Stores the logged-in session as one JSON document.
pub struct FileSessionRepository {
    file: AtomicJsonFile<AuthSession>,
}

impl FileSessionRepository {
    pub fn new(paths: &RagisPaths) -> Self {
        Self {
            file: AtomicJsonFile::new(paths.session_file()),
        }
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Option<AuthSession> {
        match self.file.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    "Discarding undecodable session at {:?}: {}",
                    self.file.path(),
                    e
                );
                None
            }
        }
    }

    async fn save(&self, session: &AuthSession) -> Result<()> {
        self.file.save(session)
    }

    async fn clear(&self) -> Result<()> {
        self.file.delete()
    }
}
