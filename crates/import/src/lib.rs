pub mod csv;
pub mod ledger;
pub mod process;
pub mod rules;
pub(crate) mod util;

pub use csv::{CsvError, StatementFormat};
pub use ledger::{read_accounts, scan_accounts, LedgerError};
pub use process::{post, post_all};
pub use rules::{Categorization, Rule, RuleError, RuleIssue, RuleKind, RuleSet, RuleSpec, TextField};

pub mod import {
    use crate::*;
    use ledgerize_core::Transaction;
    use std::path::Path;

    pub fn import_statement(
        path: &Path,
        format: StatementFormat,
    ) -> Result<Vec<Transaction>, CsvError> {
        crate::csv::import_statement(path, format)
    }

    pub fn load_rules(
        path: &Path,
        known_accounts: &std::collections::BTreeSet<String>,
    ) -> Result<RuleSet, RuleError> {
        RuleSet::load(path, known_accounts)
    }
}
