#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LEDGER: &str = r#"option "operating_currency" "EUR"

2020-01-01 open Assets:Checking EUR
2020-01-01 open Expenses:Rent
2020-01-01 open Expenses:Coffee
2020-01-01 open Expenses:Travel
2020-01-01 open Income:Salary
"#;

pub const MAPPINGS: &str = r#"
- type: text
  field: beneficiary
  contains: "ACME"
  account: "Expenses:Rent"
- type: text
  contains: "coffee"
  account: "Expenses:Coffee"
  desc_override: "Coffee"
- type: text
  field: details
  contains: "salary"
  account: "Income:Salary"
  credit_only: true
- type: date
  date_begin: "2021-03-10"
  date_end: "2021-03-20"
  account: "Expenses:Travel"
"#;

pub const STATEMENT_HEADER: &str = "\"Client account\";\"Row type\";\"Date\";\"Beneficiary/Payer\";\"Details\";\"Amount\";\"Currency\";\"Debit/Credit\";\"Archive ID\"\n\
\"EE001\";\"10\";\"01.03.2021\";\"\";\"Opening balance\";\"1000,00\";\"EUR\";\"K\";\"\"\n";

/// A scratch directory holding a full set of input files.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(statement_rows: &str) -> Self {
        Self::with_files(LEDGER, MAPPINGS, statement_rows)
    }

    pub fn with_files(ledger: &str, mappings: &str, statement_rows: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ledger.beancount"), ledger).unwrap();
        fs::write(dir.path().join("mappings.yaml"), mappings).unwrap();
        fs::write(
            dir.path().join("statement.csv"),
            format!("{STATEMENT_HEADER}{statement_rows}"),
        )
        .unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a config pointing at this workspace's files, plus `extra` YAML lines.
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let p = |name: &str| yaml_path(&self.path(name));
        let config = format!(
            "ledger: {}\nmappings_file: {}\ncsv_file: {}\noutput_file: {}\ndefault_account: \"Assets:Checking\"\n{extra}",
            p("ledger.beancount"),
            p("mappings.yaml"),
            p("statement.csv"),
            p("output.beancount"),
        );
        let path = self.path("config.yaml");
        fs::write(&path, config).unwrap();
        path
    }

    pub fn output(&self) -> String {
        fs::read_to_string(self.path("output.beancount")).unwrap()
    }

    pub fn has_output(&self) -> bool {
        self.path("output.beancount").exists()
    }
}

fn yaml_path(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}
