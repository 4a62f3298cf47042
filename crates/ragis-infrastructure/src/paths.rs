//! Unified path management for the RAGIS client's local state.
//!
//! All persisted slices - the session object, the chat history, the client
//! configuration - live under one base directory so storage stays
//! consistent across platforms.

use std::path::{Path, PathBuf};

use ragis_core::error::{RagisError, Result};

/// Unified path management for the RAGIS client.
///
/// # Directory Structure
///
/// ```text
/// <config_dir>/ragis/          # e.g. ~/.config/ragis/
/// ├── config.toml              # Client configuration
/// ├── session.json             # Persisted login session
/// └── history.json             # Saved conversations (cap 20, 48 h window)
/// ```
#[derive(Debug, Clone)]
pub struct RagisPaths {
    base_dir: PathBuf,
}

impl RagisPaths {
    /// Resolves the platform config directory. Fails only when the home
    /// directory cannot be determined.
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| RagisError::config("Cannot find config directory"))?
            .join("ragis");
        Ok(Self { base_dir })
    }

    /// Uses an explicit base directory (tests, embedding hosts).
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates the base directory if it does not exist yet.
    pub fn ensure_base_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    pub fn history_file(&self) -> PathBuf {
        self.base_dir.join("history.json")
    }
}
