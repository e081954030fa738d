//! Directory-backed storage adapter.
//!
//! Keys map to relative paths under a root directory, so a local or mounted
//! object store can serve the pipeline without a remote client.

use crate::domain::error::RepairError;
use crate::ports::storage_port::StoragePort;
use std::fs;
use std::path::PathBuf;

pub struct FsStorageAdapter {
    root: PathBuf,
}

impl FsStorageAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StoragePort for FsStorageAdapter {
    fn exists(&self, key: &str) -> Result<bool, RepairError> {
        Ok(self.object_path(key).is_file())
    }

    fn download(&self, key: &str) -> Result<String, RepairError> {
        let path = self.object_path(key);
        fs::read_to_string(&path).map_err(|e| RepairError::Storage {
            reason: format!("failed to read {}: {e}", path.display()),
        })
    }

    fn upload(&self, key: &str, content: &str) -> Result<(), RepairError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RepairError::Storage {
                reason: format!("failed to create {}: {e}", parent.display()),
            })?;
        }
        fs::write(&path, content).map_err(|e| RepairError::Storage {
            reason: format!("failed to write {}: {e}", path.display()),
        })
    }
}
