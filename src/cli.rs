//! CLI definition and dispatch.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fs_storage_adapter::FsStorageAdapter;
use crate::domain::error::RepairError;
use crate::domain::pipeline::{RepairPipeline, RunOutcome};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_STORAGE_ROOT: &str = "storage";
pub const DEFAULT_BACKUP_DIR: &str = "backup";

#[derive(Parser, Debug)]
#[command(
    name = "ohlrepair",
    about = "Repairs zero open/high/low rows in a ticker's stored price history"
)]
pub struct Cli {
    /// Ticker symbol to repair (case-insensitive)
    pub ticker: String,

    /// INI config file with a [storage] section (root, backup_dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Storage root directory (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Backup directory for corrected copies (overrides config)
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Detect and report corrections without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    // Stage 1: resolve settings (flag > config file > default).
    let config = match cli.config.as_ref().map(load_config) {
        Some(Ok(c)) => Some(c),
        Some(Err(code)) => return code,
        None => None,
    };
    let storage_root = resolve_dir(
        cli.data_dir.as_ref(),
        config.as_ref(),
        "root",
        DEFAULT_STORAGE_ROOT,
    );
    let backup_dir = resolve_dir(
        cli.backup_dir.as_ref(),
        config.as_ref(),
        "backup_dir",
        DEFAULT_BACKUP_DIR,
    );

    // Stage 2: wire the pipeline and load the sector index once.
    let storage = FsStorageAdapter::new(&storage_root);
    let pipeline = RepairPipeline::new(&storage, &backup_dir).dry_run(cli.dry_run);

    eprintln!("Loading sector mapping from {}", storage_root.display());
    let index = pipeline.load_sector_index();

    // Stage 3: run and report.
    match pipeline.run(&index, &cli.ticker) {
        Ok(RunOutcome::Clean {
            ticker, scanned, ..
        }) => {
            eprintln!("{ticker}: {scanned} records scanned, no corrections needed");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::WouldRepair {
            ticker,
            scanned,
            corrected,
            ..
        }) => {
            eprintln!(
                "{ticker}: dry run, {corrected} of {scanned} records would be corrected"
            );
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Repaired {
            ticker,
            scanned,
            corrected,
            backup,
            ..
        }) => {
            eprintln!(
                "{ticker}: corrected {corrected} of {scanned} records, backup at {}",
                backup.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {} failed, {e}", cli.ticker.to_uppercase());
            ExitCode::from(&e)
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RepairError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn resolve_dir(
    flag: Option<&PathBuf>,
    config: Option<&FileConfigAdapter>,
    key: &str,
    default: &str,
) -> PathBuf {
    if let Some(path) = flag {
        return path.clone();
    }
    if let Some(value) = config.and_then(|c| c.get_string("storage", key)) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return PathBuf::from(value);
        }
    }
    PathBuf::from(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_dir_prefers_flag_over_config() {
        let config =
            FileConfigAdapter::from_string("[storage]\nroot = from_config\n").unwrap();
        let flag = PathBuf::from("from_flag");
        let resolved = resolve_dir(Some(&flag), Some(&config), "root", DEFAULT_STORAGE_ROOT);
        assert_eq!(resolved, PathBuf::from("from_flag"));
    }

    #[test]
    fn resolve_dir_falls_back_to_config_then_default() {
        let config =
            FileConfigAdapter::from_string("[storage]\nroot = from_config\n").unwrap();
        assert_eq!(
            resolve_dir(None, Some(&config), "root", DEFAULT_STORAGE_ROOT),
            PathBuf::from("from_config")
        );
        assert_eq!(
            resolve_dir(None, Some(&config), "backup_dir", DEFAULT_BACKUP_DIR),
            PathBuf::from(DEFAULT_BACKUP_DIR)
        );
        assert_eq!(
            resolve_dir(None, None, "root", DEFAULT_STORAGE_ROOT),
            PathBuf::from(DEFAULT_STORAGE_ROOT)
        );
    }

    #[test]
    fn resolve_dir_ignores_blank_config_value() {
        let config = FileConfigAdapter::from_string("[storage]\nroot =   \n").unwrap();
        assert_eq!(
            resolve_dir(None, Some(&config), "root", DEFAULT_STORAGE_ROOT),
            PathBuf::from(DEFAULT_STORAGE_ROOT)
        );
    }
}
