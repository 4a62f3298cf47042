//! Wire types of the remote RAG service.
//!
//! Field names follow the service's JSON verbatim, Italian names and the
//! historical `messagio` spelling included; renaming here would break the
//! wire contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Successful `/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub ruolo: String,
}

/// `/chat/` response.
///
/// Normally carries `answer` (and the retrieval `sources`); during a
/// maintenance window the service instead answers `reindex: true` with a
/// human-readable `testo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub reindex: bool,
    pub testo: Option<String>,
}

/// `/upload/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    // The service has shipped both spellings; accept either.
    pub messagio: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub files_salvati: Vec<String>,
}

impl UploadResponse {
    /// The status text under whichever key the service used.
    pub fn status_text(&self) -> Option<&str> {
        self.messagio.as_deref().or(self.message.as_deref())
    }
}

/// Generic `{message}` response used by several admin endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Full pipeline parameter set from `/get_parameters`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameters {
    pub llm_model: String,
    pub embed_model: String,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    pub top_k: u32,
    pub distance_threshold: f64,
}

/// Sparse body for `/save_parameters`: only the fields the operator
/// actually changed are serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_threshold: Option<f64>,
}

impl ParameterUpdate {
    /// True when no field is populated; such an update is not worth a call.
    pub fn is_empty(&self) -> bool {
        self.llm_model.is_none()
            && self.embed_model.is_none()
            && self.chunk_size.is_none()
            && self.chunk_overlap.is_none()
            && self.top_k.is_none()
            && self.distance_threshold.is_none()
    }
}

/// One entry of `/get_models`: either a bare name or a name with its
/// installed state.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        installed: bool,
    },
}

impl ModelEntry {
    pub fn name(&self) -> &str {
        match self {
            ModelEntry::Name(name) => name,
            ModelEntry::Detailed { name, .. } => name,
        }
    }

    /// Bare names report as not installed; only a detailed entry can claim
    /// otherwise.
    pub fn installed(&self) -> bool {
        matches!(self, ModelEntry::Detailed { installed: true, .. })
    }
}

/// `{models: [...]}` wrapper of `/get_models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelEntry>,
}

/// User create/update body for `/registrazione` and `/aggiorna-utente`.
/// The service treats empty strings as "leave unchanged" on update.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub ruolo: String,
}

/// One row of `/lista-utenti`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub ruolo: String,
}

/// `{utenti: [...]}` wrapper of `/lista-utenti`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListResponse {
    pub utenti: Vec<UserRecord>,
}

/// The `detail` field of a non-2xx response: either a plain string or the
/// framework's list of structured validation errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailItem {
    pub msg: String,
}

impl Detail {
    /// Normalizes to a single human-readable string, joining structured
    /// entries.
    pub fn into_message(self) -> String {
        match self {
            Detail::Text(text) => text,
            Detail::Items(items) => items
                .into_iter()
                .map(|item| item.msg)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_maintenance_variant() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"reindex": true, "testo": "Il sistema sta aggiornando il database."}"#,
        )
        .unwrap();
        assert!(response.reindex);
        assert!(response.answer.is_none());
        assert_eq!(
            response.testo.as_deref(),
            Some("Il sistema sta aggiornando il database.")
        );
    }

    #[test]
    fn upload_accepts_both_spellings() {
        let a: UploadResponse =
            serde_json::from_str(r#"{"messagio": "Upload completato."}"#).unwrap();
        let b: UploadResponse = serde_json::from_str(r#"{"message": "Caricato."}"#).unwrap();
        assert_eq!(a.status_text(), Some("Upload completato."));
        assert_eq!(b.status_text(), Some("Caricato."));
    }

    #[test]
    fn parameter_update_serializes_sparsely() {
        let update = ParameterUpdate {
            top_k: Some(4),
            ..ParameterUpdate::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"top_k":4}"#);
        assert!(ParameterUpdate::default().is_empty());
    }

    #[test]
    fn model_entries_accept_both_shapes() {
        let response: ModelsResponse = serde_json::from_str(
            r#"{"models": ["mistral", {"name": "gemma:2b", "installed": true}]}"#,
        )
        .unwrap();
        assert_eq!(response.models[0].name(), "mistral");
        assert!(!response.models[0].installed());
        assert_eq!(response.models[1].name(), "gemma:2b");
        assert!(response.models[1].installed());
    }

    #[test]
    fn detail_normalizes_string_and_list() {
        let text: Detail = serde_json::from_str(r#""Credenziali non valide""#).unwrap();
        assert_eq!(text.into_message(), "Credenziali non valide");

        let items: Detail =
            serde_json::from_str(r#"[{"loc": ["body", "prompt"], "msg": "field required", "type": "missing"}]"#)
                .unwrap();
        assert_eq!(items.into_message(), "field required");
    }
}
