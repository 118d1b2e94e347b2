use chrono::NaiveDate;
use ledgerize_core::{parse_fixed_date, Account, Direction, Transaction};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::util::contains_ignore_case;

const RULE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One entry of the mapping file, exactly as written by the user.
///
/// ```yaml
/// - type: text
///   field: beneficiary
///   contains: ACME
///   account: Expenses:Rent
///   desc_override: Rent
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub contains: String,
    pub field: String,
    pub date_begin: String,
    pub date_end: String,
    pub exact_amount: Option<f64>,
    pub account: String,
    pub credit_only: bool,
    pub debit_only: bool,
    pub desc_override: String,
}

/// Which transaction text a `text` rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Any,
    Beneficiary,
    Details,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    Text { contains: String, field: TextField },
    Amount { exact_amount: f64 },
    /// Matches dates strictly between `begin` and `end`.
    Date { begin: NaiveDate, end: NaiveDate },
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Text { field: TextField::Any, .. } => write!(f, "text"),
            RuleKind::Text { field: TextField::Beneficiary, .. } => write!(f, "beneficiary"),
            RuleKind::Text { field: TextField::Details, .. } => write!(f, "details"),
            RuleKind::Amount { .. } => write!(f, "amount"),
            RuleKind::Date { .. } => write!(f, "date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    pub account: Account,
    pub description_override: Option<String>,
    /// Restricts the rule to one transaction direction.
    pub only: Option<Direction>,
}

impl Rule {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.only.is_some_and(|d| d != tx.direction) {
            return false;
        }

        match &self.kind {
            RuleKind::Text { contains, field } => {
                let in_beneficiary = || contains_ignore_case(&tx.beneficiary, contains);
                let in_details = || contains_ignore_case(&tx.description, contains);
                match field {
                    TextField::Beneficiary => in_beneficiary(),
                    TextField::Details => in_details(),
                    TextField::Any => in_beneficiary() || in_details(),
                }
            }
            RuleKind::Amount { exact_amount } => tx.amount == *exact_amount,
            RuleKind::Date { begin, end } => tx.date > *begin && tx.date < *end,
        }
    }
}

/// Outcome of a successful rule match.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorization {
    pub account: Account,
    pub description_override: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleIssue {
    #[error("unknown rule type '{0}'")]
    UnknownKind(String),
    #[error("unknown field '{0}', expected 'beneficiary' or 'details'")]
    UnknownField(String),
    #[error("account '{0}' is not opened in the ledger")]
    UnknownAccount(String),
    #[error("amount {0} must be a non-negative number")]
    InvalidAmount(f64),
    #[error("amount rule without exact_amount")]
    MissingAmount,
    #[error("date rule without {0}")]
    MissingDate(&'static str),
    #[error("{field} '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { field: &'static str, value: String },
    #[error("date_begin {begin} is not before date_end {end}")]
    EmptyDateRange { begin: NaiveDate, end: NaiveDate },
    #[error("text rule with empty 'contains'")]
    EmptyPattern,
    #[error("credit_only and debit_only are both set")]
    ConflictingDirection,
}

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Failed to read mapping file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse mapping file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid mapping #{position}: {issue}")]
    Invalid { position: usize, issue: RuleIssue },
}

pub fn parse_rule_specs(yaml: &str) -> Result<Vec<RuleSpec>, RuleError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn load_rule_specs(path: &Path) -> Result<Vec<RuleSpec>, RuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| RuleError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_rule_specs(&content)
}

/// Rule dates must be exactly `YYYY-MM-DD`.
fn parse_rule_date(field: &'static str, value: &str) -> Result<NaiveDate, RuleIssue> {
    if value.is_empty() {
        return Err(RuleIssue::MissingDate(field));
    }
    parse_fixed_date(value, RULE_DATE_FORMAT).ok_or_else(|| RuleIssue::InvalidDate {
        field,
        value: value.to_string(),
    })
}

impl RuleSpec {
    /// Checks the spec against the ledger accounts and converts it to a typed rule.
    pub fn validate(&self, known_accounts: &BTreeSet<String>) -> Result<Rule, RuleIssue> {
        if !matches!(self.kind.as_str(), "text" | "amount" | "date") {
            return Err(RuleIssue::UnknownKind(self.kind.clone()));
        }
        // Only text rules read `field`.
        let field = match self.field.as_str() {
            "" => TextField::Any,
            "beneficiary" => TextField::Beneficiary,
            "details" => TextField::Details,
            other if self.kind == "text" => return Err(RuleIssue::UnknownField(other.to_string())),
            _ => TextField::Any,
        };
        if !known_accounts.contains(&self.account) {
            return Err(RuleIssue::UnknownAccount(self.account.clone()));
        }
        if let Some(amount) = self.exact_amount {
            if amount < 0.0 || !amount.is_finite() {
                return Err(RuleIssue::InvalidAmount(amount));
            }
        }

        let kind = match self.kind.as_str() {
            "date" => {
                let begin = parse_rule_date("date_begin", &self.date_begin)?;
                let end = parse_rule_date("date_end", &self.date_end)?;
                if begin >= end {
                    return Err(RuleIssue::EmptyDateRange { begin, end });
                }
                RuleKind::Date { begin, end }
            }
            "amount" => RuleKind::Amount {
                exact_amount: self.exact_amount.ok_or(RuleIssue::MissingAmount)?,
            },
            _ => {
                if self.contains.is_empty() {
                    return Err(RuleIssue::EmptyPattern);
                }
                RuleKind::Text {
                    contains: self.contains.clone(),
                    field,
                }
            }
        };

        let only = match (self.credit_only, self.debit_only) {
            (true, true) => return Err(RuleIssue::ConflictingDirection),
            (true, false) => Some(Direction::Credit),
            (false, true) => Some(Direction::Debit),
            (false, false) => None,
        };

        Ok(Rule {
            kind,
            account: Account::new(&self.account),
            description_override: Some(self.desc_override.clone()).filter(|d| !d.is_empty()),
            only,
        })
    }
}

/// Ordered categorization rules. The first rule that matches decides the account.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Validates every spec; the first invalid one rejects the whole set.
    pub fn validate(
        specs: &[RuleSpec],
        known_accounts: &BTreeSet<String>,
    ) -> Result<Self, RuleError> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                spec.validate(known_accounts).map_err(|issue| {
                    tracing::error!(position = idx + 1, rule = ?spec, %issue, "invalid mapping");
                    RuleError::Invalid {
                        position: idx + 1,
                        issue,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn load(path: &Path, known_accounts: &BTreeSet<String>) -> Result<Self, RuleError> {
        let specs = load_rule_specs(path)?;
        let rules = Self::validate(&specs, known_accounts)?;
        tracing::info!(file = %path.display(), rules = rules.len(), "mappings validated");
        Ok(rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn find_matching_rule(&self, tx: &Transaction) -> Option<(usize, &Rule)> {
        self.rules.iter().enumerate().find(|(_, rule)| rule.matches(tx))
    }

    pub fn categorize(&self, tx: &Transaction) -> Option<Categorization> {
        let (idx, rule) = self.find_matching_rule(tx)?;
        tracing::debug!(
            rule = idx + 1,
            kind = %rule.kind,
            account = %rule.account,
            description = %tx.description,
            "found match for transaction"
        );
        Some(Categorization {
            account: rule.account.clone(),
            description_override: rule.description_override.clone(),
        })
    }
}
