//! Atomic JSON file operations.
//!
//! A thin layer for safe access to the JSON-encoded state slices. Saves go
//! through a temporary file plus rename, so readers never observe a
//! half-written document; concurrent writers are last-write-wins.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use ragis_core::error::Result;

/// A handle to one JSON document on disk.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: successfully loaded and deserialized
    /// - `Ok(None)`: file doesn't exist or is empty
    /// - `Err`: failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes and saves the document atomically (tmp file + rename).
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(data)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the document. Deleting an absent document is a no-op.
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    fn file_in(dir: &TempDir) -> AtomicJsonFile<Doc> {
        AtomicJsonFile::new(dir.path().join("doc.json"))
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(file_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        let doc = Doc {
            name: "prova".to_string(),
            count: 3,
        };

        file.save(&doc).unwrap();
        assert_eq!(file.load().unwrap(), Some(doc));
    }

    #[test]
    fn load_empty_file_is_none() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        fs::write(file.path(), "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn load_malformed_file_errors() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        fs::write(file.path(), "{not json").unwrap();
        assert!(file.load().is_err());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        file.save(&Doc {
            name: "x".to_string(),
            count: 0,
        })
        .unwrap();

        file.delete().unwrap();
        file.delete().unwrap();
        assert!(file.load().unwrap().is_none());
    }
}
