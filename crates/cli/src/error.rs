use ledgerize_import::{CsvError, LedgerError, RuleError};
use thiserror::Error;

use crate::config::ConfigError;

/// Every way a run can fail. Each stage aborts the run; nothing is written.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read config: {0}")]
    ConfigRead(#[source] ConfigError),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[source] ConfigError),
    #[error("Invalid config: {0}")]
    ConfigInvalid(#[source] ConfigError),
    #[error("Failed to read ledger accounts: {0}")]
    LedgerRead(#[from] LedgerError),
    #[error("Failed to read mappings: {0}")]
    MappingRead(#[source] RuleError),
    #[error("Failed to validate mappings: {0}")]
    MappingValidation(#[source] RuleError),
    #[error("Failed to read CSV: {0}")]
    CsvRead(#[source] CsvError),
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[source] CsvError),
    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Read { .. } => PipelineError::ConfigRead(err),
            ConfigError::Parse(_) => PipelineError::ConfigParse(err),
            ConfigError::Invalid { .. } => PipelineError::ConfigInvalid(err),
        }
    }
}

impl From<RuleError> for PipelineError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Read { .. } | RuleError::Parse(_) => PipelineError::MappingRead(err),
            RuleError::Invalid { .. } => PipelineError::MappingValidation(err),
        }
    }
}

impl From<CsvError> for PipelineError {
    fn from(err: CsvError) -> Self {
        if err.is_read_error() {
            PipelineError::CsvRead(err)
        } else {
            PipelineError::CsvParse(err)
        }
    }
}
