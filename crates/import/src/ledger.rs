use regex::Regex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read ledger {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn open_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"open (?P<account>[A-Za-z][A-Za-z0-9-]*(?::[A-Za-z0-9][A-Za-z0-9-]*)*)")
            .expect("account pattern is valid")
    })
}

/// Collects the names of all accounts opened in a beancount ledger.
///
/// Only `open` directives are looked at; balances and postings are ignored.
pub fn scan_accounts<R: Read>(data: R) -> std::io::Result<BTreeSet<String>> {
    let re = open_directive();
    let mut accounts = BTreeSet::new();

    for line in BufReader::new(data).lines() {
        let line = line?;
        if let Some(caps) = re.captures(&line) {
            accounts.insert(caps["account"].to_string());
        }
    }

    Ok(accounts)
}

pub fn read_accounts(path: &Path) -> Result<BTreeSet<String>, LedgerError> {
    let read_err = |source| LedgerError::Read {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let accounts = scan_accounts(file).map_err(read_err)?;
    tracing::info!(file = %path.display(), accounts = accounts.len(), "found ledger accounts");
    Ok(accounts)
}
