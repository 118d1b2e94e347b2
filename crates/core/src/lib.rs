pub mod account;
pub mod period;
pub mod render;
pub mod transaction;

pub use account::{Account, UNCATEGORIZED_ACCOUNT};
pub use period::{filter_by_range, parse_fixed_date, DateRange};
pub use render::{render_ledger, render_transaction, write_ledger};
pub use transaction::{Direction, PostedTransaction, Transaction};
