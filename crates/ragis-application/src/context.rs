//! Application context: the single authoritative wiring of services,
//! repositories, and the remote client.
//!
//! Views and handlers receive this context explicitly instead of reaching
//! for ambient globals; the persisted slices (session, history, config)
//! round-trip only through the repositories wired here.

use std::sync::Arc;

use ragis_core::error::Result;
use ragis_core::history::HistoryRepository;
use ragis_core::remote::RagService;
use ragis_core::session::SessionRepository;
use ragis_infrastructure::{
    ConfigService, FileHistoryRepository, FileSessionRepository, RagisPaths,
};
use ragis_interaction::RagClient;

use crate::admin::AdminService;
use crate::auth::AuthService;
use crate::chat::ChatController;
use crate::users::UserDirectoryService;

/// Application state shared across all views.
pub struct AppContext {
    pub chat: Arc<ChatController>,
    pub auth: Arc<AuthService>,
    pub admin: Arc<AdminService>,
    pub users: Arc<UserDirectoryService>,
    pub config: Arc<ConfigService>,
    pub service: Arc<dyn RagService>,
    pub history: Arc<dyn HistoryRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl AppContext {
    /// Wires the full application against the platform config directory.
    pub fn initialize() -> Result<Self> {
        Self::with_paths(RagisPaths::new()?)
    }

    /// Wires the full application against an explicit base directory
    /// (tests, embedding hosts).
    pub fn with_paths(paths: RagisPaths) -> Result<Self> {
        paths.ensure_base_dir()?;

        let config = Arc::new(ConfigService::new(paths.clone()));
        let service: Arc<dyn RagService> = Arc::new(RagClient::new(config.get_config())?);
        let history: Arc<dyn HistoryRepository> = Arc::new(FileHistoryRepository::new(&paths));
        let sessions: Arc<dyn SessionRepository> = Arc::new(FileSessionRepository::new(&paths));

        let chat = Arc::new(ChatController::new(
            Arc::clone(&service),
            Arc::clone(&history),
        ));
        let auth = Arc::new(AuthService::new(
            Arc::clone(&service),
            Arc::clone(&sessions),
        ));
        let admin = Arc::new(AdminService::new(Arc::clone(&service)));
        let users = Arc::new(UserDirectoryService::new(Arc::clone(&service)));

        Ok(Self {
            chat,
            auth,
            admin,
            users,
            config,
            service,
            history,
            sessions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn context_wires_against_an_explicit_base_dir() {
        let dir = TempDir::new().unwrap();
        let context = AppContext::with_paths(RagisPaths::with_base_dir(dir.path())).unwrap();

        // Fresh installation: nothing persisted, nothing restored
        assert!(context.auth.restore().await.is_none());
        assert!(context.chat.history_entries().await.is_empty());
        assert_eq!(context.chat.transcript().await.len(), 1);
    }
}
