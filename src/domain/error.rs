//! Domain error types.

/// Top-level error type for ohlrepair.
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("ticker {ticker} is not listed in any sector")]
    Lookup { ticker: String },

    #[error("no price file in storage at {key}")]
    NotFound { key: String },

    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RepairError> for std::process::ExitCode {
    fn from(err: &RepairError) -> Self {
        let code: u8 = match err {
            RepairError::Io(_) => 1,
            RepairError::ConfigParse { .. } => 2,
            RepairError::Storage { .. } | RepairError::Csv { .. } => 3,
            RepairError::Lookup { .. } => 4,
            RepairError::NotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
