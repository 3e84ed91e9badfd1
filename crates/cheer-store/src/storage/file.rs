//! File-backed key-value storage
//!
//! All keys live in one JSON object on disk. Every write rewrites the whole
//! file through a sibling temp file and a rename, so readers never see a
//! partially written document.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cheer_core::traits::{KeyValueStorage, RepoResult};
use cheer_core::DomainError;
use parking_lot::Mutex;
use tracing::{debug, instrument};

type Document = BTreeMap<String, String>;

/// Durable storage in a single JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open storage at `path`, creating parent directories as needed
    ///
    /// Fails if the directory cannot be created or an existing file is not a
    /// JSON object of strings.
    #[instrument]
    pub fn open(path: impl AsRef<Path> + std::fmt::Debug) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| unavailable(parent, &e))?;
        }

        let storage = Self {
            path,
            write_lock: Mutex::new(()),
        };
        storage.read_document()?;
        Ok(storage)
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> RepoResult<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(unavailable(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            DomainError::CorruptData(format!("{}: {e}", self.path.display()))
        })
    }

    fn write_document(&self, document: &Document) -> RepoResult<()> {
        let body = serde_json::to_vec_pretty(document)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&body)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| unavailable(&self.path, &e))?;

        debug!(path = %self.path.display(), bytes = body.len(), "Storage file written");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Document)) -> RepoResult<()> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;
        apply(&mut document);
        self.write_document(&document)
    }
}

fn unavailable(path: &Path, err: &io::Error) -> DomainError {
    DomainError::StorageUnavailable(format!("{}: {err}", path.display()))
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.update(|doc| {
            doc.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.update(|doc| {
            doc.remove(key);
        })
    }
}
