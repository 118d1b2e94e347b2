use ledgerize_core::{Account, PostedTransaction, Transaction};

use crate::rules::{Categorization, RuleSet};

/// Assigns both sides of the entry. Without a categorization the counter side
/// is the uncategorized sentinel account.
pub fn post(
    mut transaction: Transaction,
    default_account: &Account,
    categorization: Option<Categorization>,
) -> PostedTransaction {
    let counter_account = match categorization {
        Some(Categorization {
            account,
            description_override,
        }) => {
            if let Some(description) = description_override {
                transaction.description = description;
            }
            account
        }
        None => Account::uncategorized(),
    };
    PostedTransaction::post(transaction, default_account.clone(), counter_account)
}

/// Categorizes and posts a batch, keeping input order.
pub fn post_all(
    transactions: Vec<Transaction>,
    default_account: &Account,
    rules: &RuleSet,
) -> Vec<PostedTransaction> {
    let posted: Vec<PostedTransaction> = transactions
        .into_iter()
        .map(|tx| {
            let categorization = rules.categorize(&tx);
            post(tx, default_account, categorization)
        })
        .collect();

    let uncategorized = posted
        .iter()
        .filter(|tx| tx.credit_account.is_uncategorized() || tx.debit_account.is_uncategorized())
        .count();
    tracing::info!(
        transactions = posted.len(),
        uncategorized,
        "processed transactions"
    );
    posted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleKind, TextField};
    use chrono::NaiveDate;
    use ledgerize_core::Direction;

    fn tx(direction: Direction, beneficiary: &str, description: &str) -> Transaction {
        Transaction {
            direction,
            amount: 42.0,
            currency: "EUR".to_string(),
            beneficiary: beneficiary.to_string(),
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 5, 5).unwrap(),
        }
    }

    fn matched(account: &str, description_override: Option<&str>) -> Option<Categorization> {
        Some(Categorization {
            account: Account::new(account),
            description_override: description_override.map(str::to_string),
        })
    }

    fn checking() -> Account {
        Account::new("Assets:Checking")
    }

    #[test]
    fn debit_with_match() {
        let posted = post(
            tx(Direction::Debit, "Shop", "food"),
            &checking(),
            matched("Expenses:Food", None),
        );
        assert_eq!(posted.debit_account, checking());
        assert_eq!(posted.credit_account.name(), "Expenses:Food");
        assert_eq!(posted.description(), "food");
    }

    #[test]
    fn credit_with_match() {
        let posted = post(
            tx(Direction::Credit, "Boss", "pay"),
            &checking(),
            matched("Income:Salary", None),
        );
        assert_eq!(posted.credit_account, checking());
        assert_eq!(posted.debit_account.name(), "Income:Salary");
    }

    #[test]
    fn debit_without_match_uses_sentinel() {
        let posted = post(tx(Direction::Debit, "?", "?"), &checking(), None);
        assert_eq!(posted.debit_account, checking());
        assert!(posted.credit_account.is_uncategorized());
    }

    #[test]
    fn credit_without_match_uses_sentinel() {
        let posted = post(tx(Direction::Credit, "?", "?"), &checking(), None);
        assert_eq!(posted.credit_account, checking());
        assert!(posted.debit_account.is_uncategorized());
    }

    #[test]
    fn override_replaces_description_only() {
        let original = tx(Direction::Debit, "ACME", "SEPA 123456");
        let posted = post(original.clone(), &checking(), matched("Expenses:Rent", Some("Rent")));
        assert_eq!(posted.description(), "Rent");
        assert_eq!(posted.transaction.beneficiary, original.beneficiary);
        assert_eq!(posted.transaction.amount, original.amount);
        assert_eq!(posted.transaction.date, original.date);
        assert_eq!(posted.transaction.currency, original.currency);
    }

    #[test]
    fn post_all_keeps_order_and_applies_rules() {
        let rules = RuleSet::new(vec![Rule {
            kind: RuleKind::Text {
                contains: "acme".to_string(),
                field: TextField::Beneficiary,
            },
            account: Account::new("Expenses:Rent"),
            description_override: None,
            only: None,
        }]);
        let txs = vec![
            tx(Direction::Debit, "ACME Corp", "rent"),
            tx(Direction::Debit, "Unknown", "misc"),
        ];
        let posted = post_all(txs, &checking(), &rules);
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0].credit_account.name(), "Expenses:Rent");
        assert!(posted[1].credit_account.is_uncategorized());
    }
}
