use ledgerize_core::{filter_by_range, write_ledger, PostedTransaction};
use ledgerize_import::import::{import_statement, load_rules};
use ledgerize_import::{post_all, read_accounts};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::Config;
use crate::error::PipelineError;

/// Runs one conversion: ledger accounts, mappings, statement, categorization,
/// optional date window, output. Returns the number of entries written.
pub fn run(config: &Config) -> Result<usize, PipelineError> {
    let accounts = read_accounts(&config.ledger)?;
    let rules = load_rules(&config.mappings_file, &accounts)?;
    if rules.is_empty() {
        tracing::warn!(
            file = %config.mappings_file.display(),
            "no mappings defined, every transaction will be uncategorized"
        );
    }

    let transactions = import_statement(&config.csv_file, config.csv_type)?;
    tracing::info!(
        file = %config.csv_file.display(),
        transactions = transactions.len(),
        "found and parsed transactions"
    );

    let mut posted = post_all(transactions, &config.default_account, &rules);
    if let Some(range) = config.date_range() {
        posted = filter_by_range(posted, range);
        tracing::info!(%range, transactions = posted.len(), "filtered by date");
    }

    write_output(&config.output_file, &posted)?;
    tracing::info!(
        file = %config.output_file.display(),
        entries = posted.len(),
        "wrote ledger entries"
    );
    Ok(posted.len())
}

fn write_output(path: &Path, transactions: &[PostedTransaction]) -> Result<(), PipelineError> {
    let write_err = |source| PipelineError::OutputWrite {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    write_ledger(BufWriter::new(file), transactions).map_err(write_err)
}
