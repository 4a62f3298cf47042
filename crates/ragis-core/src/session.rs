//! Authenticated-session domain model and persistence port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The logged-in user as persisted between application runs.
///
/// The token is an opaque bearer credential issued by the remote service;
/// nothing here inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub token: String,
    pub ruolo: String,
}

impl AuthSession {
    /// Builds a session from the login response fields. The admin flag is
    /// derived from the role, case-insensitively.
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        ruolo: impl Into<String>,
    ) -> Self {
        let ruolo = ruolo.into();
        Self {
            username: username.into(),
            is_admin: ruolo.eq_ignore_ascii_case("admin"),
            token: token.into(),
            ruolo,
        }
    }
}

/// An abstract repository for the persisted session slice.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted session. Absent or undecodable data is `None`.
    async fn load(&self) -> Option<AuthSession>;

    /// Persists the session.
    async fn save(&self, session: &AuthSession) -> Result<()>;

    /// Removes the persisted session. Removing an absent session is a no-op.
    async fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_flag_derives_from_role_case_insensitively() {
        assert!(AuthSession::new("mario", "t", "Admin").is_admin);
        assert!(AuthSession::new("mario", "t", "admin").is_admin);
        assert!(!AuthSession::new("mario", "t", "utente").is_admin);
    }

    #[test]
    fn session_round_trips_with_camel_case_flag() {
        let session = AuthSession::new("mario", "tok", "admin");
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains(r#""isAdmin":true"#));

        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
