#![allow(dead_code)]

use ohlrepair::domain::error::RepairError;
use ohlrepair::ports::storage_port::StoragePort;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory object store that records every call, so tests can assert the
/// pipeline's I/O discipline (no download after a failed existence check, no
/// upload on a no-op run, and so on).
pub struct MockStoragePort {
    pub objects: RefCell<HashMap<String, String>>,
    pub errors: HashMap<String, String>,
    pub upload_error: Option<String>,
    pub downloads: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<String>>,
    pub existence_checks: RefCell<Vec<String>>,
}

impl MockStoragePort {
    pub fn new() -> Self {
        Self {
            objects: RefCell::new(HashMap::new()),
            errors: HashMap::new(),
            upload_error: None,
            downloads: RefCell::new(Vec::new()),
            uploads: RefCell::new(Vec::new()),
            existence_checks: RefCell::new(Vec::new()),
        }
    }

    pub fn with_object(self, key: &str, content: &str) -> Self {
        self.objects
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
        self
    }

    /// Make download of `key` fail with `reason`.
    pub fn with_error(mut self, key: &str, reason: &str) -> Self {
        self.errors.insert(key.to_string(), reason.to_string());
        self
    }

    /// Make every upload fail with `reason`.
    pub fn with_upload_error(mut self, reason: &str) -> Self {
        self.upload_error = Some(reason.to_string());
        self
    }

    pub fn object(&self, key: &str) -> Option<String> {
        self.objects.borrow().get(key).cloned()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.borrow().len()
    }

    pub fn download_count(&self) -> usize {
        self.downloads.borrow().len()
    }
}

impl StoragePort for MockStoragePort {
    fn exists(&self, key: &str) -> Result<bool, RepairError> {
        self.existence_checks.borrow_mut().push(key.to_string());
        Ok(self.objects.borrow().contains_key(key))
    }

    fn download(&self, key: &str) -> Result<String, RepairError> {
        self.downloads.borrow_mut().push(key.to_string());
        if let Some(reason) = self.errors.get(key) {
            return Err(RepairError::Storage {
                reason: reason.clone(),
            });
        }
        self.objects
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| RepairError::Storage {
                reason: format!("no object at {key}"),
            })
    }

    fn upload(&self, key: &str, content: &str) -> Result<(), RepairError> {
        self.uploads.borrow_mut().push(key.to_string());
        if let Some(reason) = &self.upload_error {
            return Err(RepairError::Storage {
                reason: reason.clone(),
            });
        }
        self.objects
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
        Ok(())
    }
}

pub const SECTOR_MAPPING: &str = "sector,ticker\n\
    Banking,BBRI\n\
    Banking,BBCA\n\
    Energy,ADRO\n";

pub const BBRI_WITH_ANOMALY: &str = "Date,Open,High,Low,Close,Volume\n\
    2024-01-01,0,0,0,100,50000\n\
    2024-01-02,50,55,48,52,60000\n";

pub const BBRI_CLEAN: &str = "Date,Open,High,Low,Close,Volume\n\
    2024-01-01,98,102,96,100,50000\n\
    2024-01-02,50,55,48,52,60000\n";
