//! Administrative operations: document upload, reindexing, pipeline
//! parameters, and model management.
//!
//! Action methods return the status string the UI's single transient
//! status line shows; remote failures are converted here and never
//! propagate. Data fetches return `Result` so callers can render the
//! payload.

use std::path::Path;
use std::sync::Arc;

use ragis_core::error::Result;
use ragis_core::remote::{ModelEntry, ParameterUpdate, Parameters, RagService};

pub struct AdminService {
    service: Arc<dyn RagService>,
}

impl AdminService {
    pub fn new(service: Arc<dyn RagService>) -> Self {
        Self { service }
    }

    /// Uploads documents for indexing.
    pub async fn upload_documents(&self, files: &[&Path]) -> String {
        match self.service.upload_documents(files).await {
            Ok(response) => response
                .status_text()
                .unwrap_or("Documento caricato.")
                .to_string(),
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                "Errore nel caricamento.".to_string()
            }
        }
    }

    /// Rebuilds the vector database.
    pub async fn reindex(&self) -> String {
        match self.service.reindex().await {
            Ok(response) => response.message,
            Err(e) => {
                tracing::warn!("Reindex failed: {}", e);
                "Errore nella reindicizzazione.".to_string()
            }
        }
    }

    /// Reads the full pipeline parameter set.
    pub async fn get_parameters(&self) -> Result<Parameters> {
        self.service.get_parameters().await
    }

    /// Saves only the fields the operator changed. An empty update skips
    /// the call entirely.
    pub async fn save_parameters(&self, update: &ParameterUpdate) -> String {
        if update.is_empty() {
            return "Nessun parametro da salvare.".to_string();
        }
        match self.service.save_parameters(update).await {
            Ok(response) => response.message,
            Err(e) => {
                tracing::warn!("Saving parameters failed: {}", e);
                "Errore nel salvataggio dei parametri.".to_string()
            }
        }
    }

    /// Lists the models the service can serve.
    pub async fn get_models(&self) -> Result<Vec<ModelEntry>> {
        self.service.get_models().await
    }

    /// Asks the service to pull a model. The remote's own `detail` text is
    /// surfaced on failure.
    pub async fn download_model(&self, model_name: &str) -> String {
        match self.service.download_model(model_name).await {
            Ok(()) => format!("Modello {} scaricato.", model_name),
            Err(e) => {
                tracing::warn!("Model download failed: {}", e);
                e.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRagService;
    use ragis_core::error::RagisError;

    fn fixture() -> (AdminService, Arc<MockRagService>) {
        let service = Arc::new(MockRagService::new());
        let admin = AdminService::new(Arc::clone(&service) as Arc<dyn RagService>);
        (admin, service)
    }

    #[tokio::test]
    async fn upload_surfaces_the_server_message() {
        let (admin, _service) = fixture();
        let status = admin.upload_documents(&[Path::new("atto.pdf")]).await;
        assert_eq!(status, "Upload completato.");
    }

    #[tokio::test]
    async fn upload_failure_degrades_to_a_generic_status() {
        let (admin, service) = fixture();
        *service.upload_response.lock().unwrap() =
            Some(Err(RagisError::transport("connessione rifiutata")));

        let status = admin.upload_documents(&[Path::new("atto.pdf")]).await;
        assert_eq!(status, "Errore nel caricamento.");
    }

    #[tokio::test]
    async fn empty_parameter_update_skips_the_call() {
        let (admin, service) = fixture();
        let status = admin.save_parameters(&ParameterUpdate::default()).await;
        assert_eq!(status, "Nessun parametro da salvare.");
        assert!(service.saved_parameters.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sparse_parameter_update_reaches_the_service() {
        let (admin, service) = fixture();
        let update = ParameterUpdate {
            top_k: Some(4),
            ..ParameterUpdate::default()
        };

        let status = admin.save_parameters(&update).await;

        assert_eq!(status, "Parametri salvati con successo");
        let saved = service.saved_parameters.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].top_k, Some(4));
        assert!(saved[0].llm_model.is_none());
    }

    #[tokio::test]
    async fn reindex_surfaces_the_server_message() {
        let (admin, _service) = fixture();
        assert_eq!(admin.reindex().await, "Indicizzazione completata.");
    }

    #[tokio::test]
    async fn download_model_records_the_request() {
        let (admin, service) = fixture();
        let status = admin.download_model("gemma:2b").await;
        assert_eq!(status, "Modello gemma:2b scaricato.");
        assert_eq!(
            service.downloaded_models.lock().unwrap().as_slice(),
            ["gemma:2b"]
        );
    }
}
