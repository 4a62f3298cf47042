//! The remote RAG service as seen from the client.
//!
//! The service is an external collaborator reachable over HTTP JSON; this
//! module defines the port trait the application layer programs against and
//! the wire types the service speaks. The HTTP adapter lives in
//! `ragis-interaction`.

mod types;

use async_trait::async_trait;
use std::path::Path;

pub use types::{
    ChatResponse, Detail, DetailItem, LoginResponse, MessageResponse, ModelEntry, ModelsResponse,
    ParameterUpdate, Parameters, UploadResponse, UserListResponse, UserPayload, UserRecord,
};

use crate::error::Result;

/// Typed operations of the remote RAG service.
///
/// Every operation except `login` requires a bearer token, installed via
/// [`set_token`](Self::set_token) after authentication and attached by the
/// adapter as `Authorization: Bearer <token>`.
#[async_trait]
pub trait RagService: Send + Sync {
    /// Installs (or clears) the bearer token used by protected calls.
    fn set_token(&self, token: Option<String>);

    /// POST `/login` - exchanges credentials for a token and role.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    /// POST `/chat/` - submits a prompt and awaits the generated answer.
    async fn chat(&self, prompt: &str) -> Result<ChatResponse>;

    /// POST `/upload/` (multipart) - uploads documents for indexing.
    async fn upload_documents(&self, files: &[&Path]) -> Result<UploadResponse>;

    /// GET `/reindex/` - rebuilds the vector database.
    async fn reindex(&self) -> Result<MessageResponse>;

    /// GET `/get_parameters` - reads the full pipeline parameter set.
    async fn get_parameters(&self) -> Result<Parameters>;

    /// POST `/save_parameters` - writes only the populated fields.
    async fn save_parameters(&self, update: &ParameterUpdate) -> Result<MessageResponse>;

    /// GET `/get_models` - lists the models the service can serve.
    async fn get_models(&self) -> Result<Vec<ModelEntry>>;

    /// POST `/download_model` - asks the service to pull a model.
    async fn download_model(&self, model_name: &str) -> Result<()>;

    /// POST `/registrazione` - creates a user (admin only).
    async fn register_user(&self, user: &UserPayload) -> Result<()>;

    /// GET `/lista-utenti` - lists users (admin only).
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// PUT `/aggiorna-utente/{id}` - updates a user; empty fields are left
    /// unchanged by the service.
    async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()>;

    /// DELETE `/cancella-utente/{id}` - removes a user (admin only).
    async fn delete_user(&self, id: i64) -> Result<()>;
}
