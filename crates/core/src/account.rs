use std::fmt;

/// Counter-account assigned to transactions that no rule matched.
pub const UNCATEGORIZED_ACCOUNT: &str = "UNCATEGORIZED_ACCOUNT";

/// A hierarchical ledger account name such as `Assets:Bank:Checking`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account(String);

impl Account {
    pub fn new(name: &str) -> Self {
        Account(name.to_string())
    }

    pub fn uncategorized() -> Self {
        Account::new(UNCATEGORIZED_ACCOUNT)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_uncategorized(&self) -> bool {
        self.0 == UNCATEGORIZED_ACCOUNT
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Account {
    fn from(name: String) -> Self {
        Account(name)
    }
}

impl From<&str> for Account {
    fn from(name: &str) -> Self {
        Account::new(name)
    }
}
