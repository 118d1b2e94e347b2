use chrono::NaiveDate;
use ledgerize_core::{parse_fixed_date, Account, DateRange};
use ledgerize_import::StatementFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAPPINGS_FILE: &str = "mappings.yaml";
pub const DEFAULT_OUTPUT_FILE: &str = "output.beancount";
pub const DEFAULT_CSV_FILE: &str = "statement.csv";
pub const DEFAULT_LEDGER_FILE: &str = "ledger.beancount";
pub const DEFAULT_ACCOUNT: &str = "Assets:EE:Bank:Personal:Checking";

const CONFIG_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid {field} in config: '{value}'")]
    Invalid { field: &'static str, value: String },
}

/// The config file as written; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    mappings_file: Option<String>,
    output_file: Option<String>,
    csv_file: Option<String>,
    csv_type: Option<String>,
    ledger: Option<String>,
    from_date: Option<String>,
    until_date: Option<String>,
    default_account: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mappings_file: PathBuf,
    pub output_file: PathBuf,
    pub csv_file: PathBuf,
    pub csv_type: StatementFormat,
    pub ledger: PathBuf,
    pub from_date: Option<NaiveDate>,
    pub until_date: Option<NaiveDate>,
    pub default_account: Account,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mappings_file: PathBuf::from(DEFAULT_MAPPINGS_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            csv_type: StatementFormat::default(),
            ledger: PathBuf::from(DEFAULT_LEDGER_FILE),
            from_date: None,
            until_date: None,
            default_account: Account::new(DEFAULT_ACCOUNT),
        }
    }
}

/// Empty strings count as absent, like a missing key.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Dates must be exactly `YYYY-MM-DD`.
fn parse_config_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, ConfigError> {
    non_empty(value)
        .map(|v| {
            parse_fixed_date(&v, CONFIG_DATE_FORMAT).ok_or_else(|| {
                tracing::error!(field, value = %v, "invalid date specified");
                ConfigError::Invalid { field, value: v }
            })
        })
        .transpose()
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        let defaults = Config::default();

        let csv_type = match non_empty(file.csv_type) {
            Some(tag) => tag.parse::<StatementFormat>().map_err(|_| ConfigError::Invalid {
                field: "csv_type",
                value: tag,
            })?,
            None => defaults.csv_type,
        };

        Ok(Config {
            mappings_file: non_empty(file.mappings_file)
                .map_or(defaults.mappings_file, PathBuf::from),
            output_file: non_empty(file.output_file).map_or(defaults.output_file, PathBuf::from),
            csv_file: non_empty(file.csv_file).map_or(defaults.csv_file, PathBuf::from),
            csv_type,
            ledger: non_empty(file.ledger).map_or(defaults.ledger, PathBuf::from),
            from_date: parse_config_date("from_date", file.from_date)?,
            until_date: parse_config_date("until_date", file.until_date)?,
            default_account: non_empty(file.default_account)
                .map_or(defaults.default_account, Account::from),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn with_default_account(mut self, account: Account) -> Self {
        self.default_account = account;
        self
    }

    /// The output window, only when both bounds are configured.
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.from_date, self.until_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}
