//! Application layer for the RAGIS client.
//!
//! This crate provides the services that coordinate between the domain and
//! infrastructure layers: the chat controller with its debounced history
//! autosave, authentication, admin operations, and user management.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod context;
pub mod users;

pub use admin::AdminService;
pub use auth::AuthService;
pub use chat::{ChatController, SaveState, SearchMode};
pub use context::AppContext;
pub use users::UserDirectoryService;

/// Shared test helpers for service tests across ragis-application modules.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use ragis_core::error::{RagisError, Result};
    use ragis_core::remote::{
        ChatResponse, LoginResponse, MessageResponse, ModelEntry, ParameterUpdate, Parameters,
        RagService, UploadResponse, UserPayload, UserRecord,
    };

    /// A scriptable in-memory stand-in for the remote RAG service.
    ///
    /// Every call is recorded; canned responses are configured per field.
    #[derive(Default)]
    pub(crate) struct MockRagService {
        /// Answers served by `chat`, in order.
        pub chat_responses: Mutex<VecDeque<Result<ChatResponse>>>,
        /// When set, `chat` waits for a notification before answering.
        pub chat_gate: Mutex<Option<Arc<Notify>>>,
        pub login_response: Mutex<Option<Result<LoginResponse>>>,
        pub upload_response: Mutex<Option<Result<UploadResponse>>>,
        pub delete_error: Mutex<Option<RagisError>>,
        pub token: Mutex<Option<String>>,
        pub users: Mutex<Vec<UserRecord>>,
        pub registered: Mutex<Vec<UserPayload>>,
        pub updated: Mutex<Vec<(i64, UserPayload)>>,
        pub deleted_ids: Mutex<Vec<i64>>,
        pub saved_parameters: Mutex<Vec<ParameterUpdate>>,
        pub downloaded_models: Mutex<Vec<String>>,
    }

    impl MockRagService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues one successful chat answer.
        pub fn answer_with(&self, answer: &str) {
            self.chat_responses
                .lock()
                .unwrap()
                .push_back(Ok(ChatResponse {
                    answer: Some(answer.to_string()),
                    sources: Vec::new(),
                    reindex: false,
                    testo: None,
                }));
        }

        /// Queues one failed chat call.
        pub fn fail_with(&self, error: RagisError) {
            self.chat_responses.lock().unwrap().push_back(Err(error));
        }
    }

    #[async_trait]
    impl RagService for MockRagService {
        fn set_token(&self, token: Option<String>) {
            *self.token.lock().unwrap() = token;
        }

        async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse> {
            self.login_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(RagisError::internal("no canned login response")))
        }

        async fn chat(&self, _prompt: &str) -> Result<ChatResponse> {
            let gate = self.chat_gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.chat_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RagisError::internal("no canned chat response")))
        }

        async fn upload_documents(&self, files: &[&Path]) -> Result<UploadResponse> {
            self.upload_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Ok(UploadResponse {
                        messagio: Some("Upload completato.".to_string()),
                        message: None,
                        files_salvati: files
                            .iter()
                            .map(|p| p.to_string_lossy().into_owned())
                            .collect(),
                    })
                })
        }

        async fn reindex(&self) -> Result<MessageResponse> {
            Ok(MessageResponse {
                message: "Indicizzazione completata.".to_string(),
            })
        }

        async fn get_parameters(&self) -> Result<Parameters> {
            Ok(Parameters {
                llm_model: "mistral".to_string(),
                embed_model: "intfloat/e5-large-v2".to_string(),
                chunk_size: 1500,
                chunk_overlap: 200,
                top_k: 8,
                distance_threshold: 0.6,
            })
        }

        async fn save_parameters(&self, update: &ParameterUpdate) -> Result<MessageResponse> {
            self.saved_parameters.lock().unwrap().push(update.clone());
            Ok(MessageResponse {
                message: "Parametri salvati con successo".to_string(),
            })
        }

        async fn get_models(&self) -> Result<Vec<ModelEntry>> {
            Ok(vec![ModelEntry::Name("mistral".to_string())])
        }

        async fn download_model(&self, model_name: &str) -> Result<()> {
            self.downloaded_models
                .lock()
                .unwrap()
                .push(model_name.to_string());
            Ok(())
        }

        async fn register_user(&self, user: &UserPayload) -> Result<()> {
            self.registered.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn list_users(&self) -> Result<Vec<UserRecord>> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()> {
            self.updated.lock().unwrap().push((id, user.clone()));
            Ok(())
        }

        async fn delete_user(&self, id: i64) -> Result<()> {
            if let Some(error) = self.delete_error.lock().unwrap().take() {
                return Err(error);
            }
            self.deleted_ids.lock().unwrap().push(id);
            Ok(())
        }
    }
}
