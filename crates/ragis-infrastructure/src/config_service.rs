//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml` under the RAGIS base
//! directory. An absent or malformed file falls back to defaults; the
//! client must stay usable out of the box.

use std::fs;
use std::sync::{Arc, RwLock};

use ragis_core::config::ClientConfig;

use crate::paths::RagisPaths;

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: RagisPaths,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService. The configuration is loaded lazily on
    /// first access.
    pub fn new(paths: RagisPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> ClientConfig {
        let path = self.paths.config_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return ClientConfig::default(),
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config at {:?}: {}", path, e);
                ClientConfig::default()
            }
        }
    }
}
