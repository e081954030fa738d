//! Repair run orchestration: resolve, fetch, repair, persist.
//!
//! One invocation handles one ticker, sequentially. The record set is owned
//! by the run; nothing is shared across invocations except an immutable
//! sector index the caller may reuse.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::RepairError;
use crate::domain::repair;
use crate::domain::sector::SectorIndex;
use crate::domain::table::RecordSet;
use crate::ports::storage_port::StoragePort;

/// Storage key of the master sector mapping file.
pub const SECTOR_MAPPING_KEY: &str = "csv_input/sector_mapping.csv";

/// Storage key of one ticker's price history within its sector.
pub fn price_key(sector: &str, ticker: &str) -> String {
    format!("stock/{sector}/{ticker}.csv")
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No record matched the anomaly; storage and filesystem untouched.
    Clean {
        ticker: String,
        sector: String,
        scanned: usize,
    },
    /// Corrections counted but nothing written (dry run).
    WouldRepair {
        ticker: String,
        sector: String,
        scanned: usize,
        corrected: usize,
    },
    /// Corrections written to the local backup and uploaded back to storage.
    Repaired {
        ticker: String,
        sector: String,
        scanned: usize,
        corrected: usize,
        backup: PathBuf,
    },
}

pub struct RepairPipeline<'a> {
    storage: &'a dyn StoragePort,
    backup_dir: PathBuf,
    dry_run: bool,
}

impl<'a> RepairPipeline<'a> {
    pub fn new(storage: &'a dyn StoragePort, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            backup_dir: backup_dir.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Build the sector index from the master mapping in storage.
    ///
    /// A fetch failure degrades to an empty index rather than aborting: the
    /// run then fails at resolution with the ticker named, which is the error
    /// the operator actually needs.
    pub fn load_sector_index(&self) -> SectorIndex {
        match self.storage.download(SECTOR_MAPPING_KEY) {
            Ok(text) => SectorIndex::build(&text),
            Err(e) => {
                eprintln!("warning: sector mapping unavailable ({e}), using empty index");
                SectorIndex::empty()
            }
        }
    }

    /// Run the repair for one ticker against a prebuilt index.
    pub fn run(&self, index: &SectorIndex, ticker: &str) -> Result<RunOutcome, RepairError> {
        let ticker = ticker.trim().to_uppercase();

        let sector = index
            .resolve(&ticker)
            .ok_or_else(|| RepairError::Lookup {
                ticker: ticker.clone(),
            })?
            .to_string();
        eprintln!("Resolved {ticker} to sector {sector}");

        let key = price_key(&sector, &ticker);
        if !self.storage.exists(&key)? {
            return Err(RepairError::NotFound { key });
        }
        let text = self.storage.download(&key)?;
        let mut set = RecordSet::parse(&text);

        let report = repair::repair(&mut set);
        eprintln!(
            "Scanned {} records, {} corrections",
            report.scanned, report.corrected
        );

        if report.corrected == 0 {
            return Ok(RunOutcome::Clean {
                ticker,
                sector,
                scanned: report.scanned,
            });
        }
        if self.dry_run {
            return Ok(RunOutcome::WouldRepair {
                ticker,
                sector,
                scanned: report.scanned,
                corrected: report.corrected,
            });
        }

        let corrected_text = set.serialize()?;
        // Backup lands on disk before the upload is attempted, so a failed
        // upload still leaves a recoverable corrected copy.
        let backup = self.write_backup(&ticker, &corrected_text)?;
        self.storage.upload(&key, &corrected_text)?;

        Ok(RunOutcome::Repaired {
            ticker,
            sector,
            scanned: report.scanned,
            corrected: report.corrected,
            backup,
        })
    }

    fn write_backup(&self, ticker: &str, content: &str) -> Result<PathBuf, RepairError> {
        fs::create_dir_all(&self.backup_dir)?;
        let path = self.backup_dir.join(format!("{ticker}.csv"));
        fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_key_embeds_sector_and_ticker() {
        assert_eq!(price_key("Banking", "BBRI"), "stock/Banking/BBRI.csv");
    }
}
