use chrono::NaiveDate;
use std::fmt;

use super::account::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "credit"),
            Direction::Debit => write!(f, "debit"),
        }
    }
}

/// A statement line as read from the bank export, before any account is assigned.
///
/// `amount` is always the positive magnitude; `direction` carries the sign.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub direction: Direction,
    pub amount: f64,
    pub currency: String,
    pub beneficiary: String,
    pub description: String,
    pub date: NaiveDate,
}

/// A transaction with both sides of the entry assigned.
///
/// One side is always the default (bank) account, the other the categorized
/// counter-account. The debit side is rendered with the negative amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedTransaction {
    pub transaction: Transaction,
    pub credit_account: Account,
    pub debit_account: Account,
}

impl PostedTransaction {
    /// Places `default_account` on the side matching the transaction direction and
    /// `counter_account` on the other.
    pub fn post(
        transaction: Transaction,
        default_account: Account,
        counter_account: Account,
    ) -> Self {
        let (credit_account, debit_account) = match transaction.direction {
            Direction::Debit => (counter_account, default_account),
            Direction::Credit => (default_account, counter_account),
        };
        PostedTransaction {
            transaction,
            credit_account,
            debit_account,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.transaction.date
    }

    pub fn description(&self) -> &str {
        &self.transaction.description
    }
}
