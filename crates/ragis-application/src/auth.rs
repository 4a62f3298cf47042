//! Authentication service.
//!
//! Exchanges credentials for a bearer token, persists the resulting session
//! under the session storage slice, and installs the token on the remote
//! client. A rejected login never clears an existing persisted session.

use std::sync::Arc;

use ragis_core::error::Result;
use ragis_core::remote::RagService;
use ragis_core::session::{AuthSession, SessionRepository};

/// Status surfaced when the service answers 401.
pub const INVALID_CREDENTIALS: &str = "Credenziali non valide";

pub struct AuthService {
    service: Arc<dyn RagService>,
    sessions: Arc<dyn SessionRepository>,
}

impl AuthService {
    pub fn new(service: Arc<dyn RagService>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { service, sessions }
    }

    /// Logs in against the remote service.
    ///
    /// On success the session is persisted and the bearer token installed.
    /// On failure the error propagates untouched and the previously
    /// persisted session (if any) stays as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let response = self.service.login(username, password).await?;

        let session = AuthSession::new(response.username, response.token, response.ruolo);
        self.service.set_token(Some(session.token.clone()));

        if let Err(e) = self.sessions.save(&session).await {
            // A session that outlives the process is convenience, not a
            // requirement; the login itself still succeeded.
            tracing::warn!("Failed to persist session: {}", e);
        }

        Ok(session)
    }

    /// Restores the persisted session from a previous run, re-installing
    /// the bearer token. Absent or undecodable state is `None`.
    pub async fn restore(&self) -> Option<AuthSession> {
        let session = self.sessions.load().await?;
        self.service.set_token(Some(session.token.clone()));
        Some(session)
    }

    /// Clears the persisted session and the installed token.
    pub async fn logout(&self) -> Result<()> {
        self.service.set_token(None);
        self.sessions.clear().await
    }
}
