//! `RagClient` - REST implementation of the [`RagService`] port.
//!
//! All protected endpoints carry `Authorization: Bearer <token>`; the token
//! is installed after login and absent before it. Non-2xx responses are
//! normalized into [`RagisError`] variants from the service's `detail`
//! payload, which may be a plain string or a list of structured validation
//! errors.

use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use ragis_core::config::ClientConfig;
use ragis_core::error::{RagisError, Result};
use ragis_core::remote::{
    ChatResponse, Detail, LoginResponse, MessageResponse, ModelEntry, ModelsResponse,
    ParameterUpdate, Parameters, RagService, UploadResponse, UserListResponse, UserPayload,
    UserRecord,
};

/// Error envelope of non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Detail,
}

/// HTTP client for the remote RAG service.
pub struct RagClient {
    http: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl RagClient {
    /// Creates a client with the configured base URL and timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| RagisError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Attaches the bearer token when one is installed.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().unwrap().as_deref() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| RagisError::transport(e.to_string()))
    }

    /// Converts a non-2xx response into the matching error variant.
    async fn error_from(response: Response) -> RagisError {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail.into_message())
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        format!("HTTP {}", status)
                    } else {
                        body
                    }
                }),
            Err(_) => format!("HTTP {}", status),
        };

        tracing::debug!("RAG service answered {}: {}", status, message);
        if status == StatusCode::UNAUTHORIZED {
            RagisError::Auth(message)
        } else {
            RagisError::api(Some(status.as_u16()), message)
        }
    }

    /// Checks the status and decodes the JSON body.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RagisError::transport(format!("Failed to parse response: {}", e)))
    }

    /// Checks the status and discards the body (endpoints answering `{}`).
    async fn ensure_ok(response: Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl RagService for RagClient {
    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = self.http.post(self.url("/login")).json(&serde_json::json!({
            "username": username,
            "password": password,
        }));
        Self::decode(self.send(request).await?).await
    }

    async fn chat(&self, prompt: &str) -> Result<ChatResponse> {
        let request = self
            .authorize(self.http.post(self.url("/chat/")))
            .json(&serde_json::json!({ "prompt": prompt }));
        Self::decode(self.send(request).await?).await
    }

    async fn upload_documents(&self, files: &[&Path]) -> Result<UploadResponse> {
        let mut form = reqwest::multipart::Form::new();
        for path in files {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "documento".to_string());
            let mime = mime_guess::from_path(path).first_or_octet_stream();

            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime.as_ref())
                .map_err(|e| RagisError::internal(format!("Invalid MIME type: {}", e)))?;
            form = form.part("files", part);
        }

        let request = self
            .authorize(self.http.post(self.url("/upload/")))
            .multipart(form);
        Self::decode(self.send(request).await?).await
    }

    async fn reindex(&self) -> Result<MessageResponse> {
        let request = self.authorize(self.http.get(self.url("/reindex/")));
        Self::decode(self.send(request).await?).await
    }

    async fn get_parameters(&self) -> Result<Parameters> {
        let request = self.authorize(self.http.get(self.url("/get_parameters")));
        Self::decode(self.send(request).await?).await
    }

    async fn save_parameters(&self, update: &ParameterUpdate) -> Result<MessageResponse> {
        let request = self
            .authorize(self.http.post(self.url("/save_parameters")))
            .json(update);
        Self::decode(self.send(request).await?).await
    }

    async fn get_models(&self) -> Result<Vec<ModelEntry>> {
        let request = self.authorize(self.http.get(self.url("/get_models")));
        let response: ModelsResponse = Self::decode(self.send(request).await?).await?;
        Ok(response.models)
    }

    async fn download_model(&self, model_name: &str) -> Result<()> {
        let request = self
            .authorize(self.http.post(self.url("/download_model")))
            .json(&serde_json::json!({ "model_name": model_name }));
        Self::ensure_ok(self.send(request).await?).await
    }

    async fn register_user(&self, user: &UserPayload) -> Result<()> {
        let request = self
            .authorize(self.http.post(self.url("/registrazione")))
            .json(user);
        Self::ensure_ok(self.send(request).await?).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let request = self.authorize(self.http.get(self.url("/lista-utenti")));
        let response: UserListResponse = Self::decode(self.send(request).await?).await?;
        Ok(response.utenti)
    }

    async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()> {
        let request = self
            .authorize(self.http.put(self.url(&format!("/aggiorna-utente/{}", id))))
            .json(user);
        Self::ensure_ok(self.send(request).await?).await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let request = self
            .authorize(self.http.delete(self.url(&format!("/cancella-utente/{}", id))));
        Self::ensure_ok(self.send(request).await?).await
    }
}
