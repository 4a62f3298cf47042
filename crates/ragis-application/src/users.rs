//! User management (admin only): list, register, update, and a staged
//! confirm-before-delete flow.
//!
//! Deletion is destructive, so it is a two-step operation: the id is staged
//! with [`request_delete`](UserDirectoryService::request_delete) and the
//! remote call only happens on
//! [`confirm_delete`](UserDirectoryService::confirm_delete).

use std::sync::{Arc, Mutex};

use ragis_core::error::Result;
use ragis_core::remote::{RagService, UserPayload, UserRecord};

pub struct UserDirectoryService {
    service: Arc<dyn RagService>,
    pending_deletion: Mutex<Option<i64>>,
}

impl UserDirectoryService {
    pub fn new(service: Arc<dyn RagService>) -> Self {
        Self {
            service,
            pending_deletion: Mutex::new(None),
        }
    }

    /// Lists all users.
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        self.service.list_users().await
    }

    /// Creates a user. Returns the status line text.
    pub async fn register(&self, user: &UserPayload) -> String {
        match self.service.register_user(user).await {
            Ok(()) => "Registrazione completata".to_string(),
            Err(e) => {
                tracing::warn!("User registration failed: {}", e);
                e.to_string()
            }
        }
    }

    /// Updates a user. Empty fields are left unchanged by the service.
    pub async fn update(&self, id: i64, user: &UserPayload) -> String {
        match self.service.update_user(id, user).await {
            Ok(()) => "Utente aggiornato correttamente".to_string(),
            Err(e) => {
                tracing::warn!("User update failed: {}", e);
                e.to_string()
            }
        }
    }

    /// Stages a deletion awaiting confirmation, replacing any previous
    /// stage.
    pub fn request_delete(&self, id: i64) {
        *self.pending_deletion.lock().unwrap() = Some(id);
    }

    /// The id currently staged for deletion, if any.
    pub fn pending_delete(&self) -> Option<i64> {
        *self.pending_deletion.lock().unwrap()
    }

    /// Drops the staged deletion without calling the service.
    pub fn cancel_delete(&self) {
        *self.pending_deletion.lock().unwrap() = None;
    }

    /// Performs the staged deletion. The stage is cleared whether the call
    /// succeeds or not.
    pub async fn confirm_delete(&self) -> String {
        let Some(id) = self.pending_deletion.lock().unwrap().take() else {
            return "Nessuna cancellazione in sospeso.".to_string();
        };

        match self.service.delete_user(id).await {
            Ok(()) => "Utente cancellato con successo".to_string(),
            Err(e) => {
                tracing::warn!("User deletion failed: {}", e);
                e.to_string()
            }
        }
    }
}
