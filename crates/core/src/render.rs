//! Beancount text output.
//!
//! ```text
//! 2020-01-03 * "HTB subscription"
//!     Expenses:Study 11.96 EUR
//!     Assets:Bank:Checking -11.96 EUR
//! ```

use std::fmt::Write as _;
use std::io;

use super::transaction::PostedTransaction;

/// Renders one entry, terminated by a newline.
pub fn render_transaction(tx: &PostedTransaction) -> String {
    let t = &tx.transaction;
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} * \"{}\"", t.date.format("%Y-%m-%d"), escape(&t.description));
    let _ = writeln!(out, "\t{} {} {}", tx.credit_account, t.amount, t.currency);
    let _ = writeln!(out, "\t{} -{} {}", tx.debit_account, t.amount, t.currency);
    out
}

/// Renders all entries in order, separated by a blank line.
pub fn render_ledger(transactions: &[PostedTransaction]) -> String {
    transactions
        .iter()
        .map(render_transaction)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_ledger<W: io::Write>(
    mut writer: W,
    transactions: &[PostedTransaction],
) -> io::Result<()> {
    writer.write_all(render_ledger(transactions).as_bytes())?;
    writer.flush()
}

fn escape(description: &str) -> String {
    description.replace('\\', "\\\\").replace('"', "\\\"")
}
