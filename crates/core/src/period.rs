use chrono::NaiveDate;
use std::fmt;

use super::transaction::PostedTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Inclusive on both ends.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Parses a date whose layout uses only `%d`, `%m` and `%Y`.
///
/// Unlike plain `NaiveDate::parse_from_str`, every field must be zero-padded to
/// its full width (two digits for day and month, four for the year) and no
/// surrounding whitespace is accepted.
pub fn parse_fixed_date(value: &str, format: &str) -> Option<NaiveDate> {
    let mut input = value.chars();
    let mut layout = format.chars();

    while let Some(c) = layout.next() {
        if c != '%' {
            if input.next()? != c {
                return None;
            }
            continue;
        }
        let width = match layout.next()? {
            'd' | 'm' => 2,
            'Y' => 4,
            _ => return None,
        };
        for _ in 0..width {
            if !input.next()?.is_ascii_digit() {
                return None;
            }
        }
    }
    if input.next().is_some() {
        return None;
    }

    NaiveDate::parse_from_str(value, format).ok()
}

/// Keeps the transactions dated within `range`, preserving order.
pub fn filter_by_range(
    transactions: Vec<PostedTransaction>,
    range: DateRange,
) -> Vec<PostedTransaction> {
    transactions
        .into_iter()
        .filter(|tx| range.contains(tx.date()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use crate::transaction::{Direction, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn posted(on: NaiveDate, description: &str) -> PostedTransaction {
        PostedTransaction::post(
            Transaction {
                direction: Direction::Debit,
                amount: 1.0,
                currency: "EUR".to_string(),
                beneficiary: String::new(),
                description: description.to_string(),
                date: on,
            },
            Account::new("Assets:Checking"),
            Account::uncategorized(),
        )
    }

    #[test]
    fn date_range_contains() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert!(range.contains(date(2024, 6, 15)));
        assert!(range.contains(date(2024, 1, 1))); // inclusive start
        assert!(range.contains(date(2024, 12, 31))); // inclusive end
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2025, 1, 1)));
    }

    #[test]
    fn date_range_display() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(range.to_string(), "2024-01-01 to 2024-12-31");
    }

    #[test]
    fn fixed_date_accepts_padded_fields() {
        assert_eq!(parse_fixed_date("01.03.2021", "%d.%m.%Y"), Some(date(2021, 3, 1)));
        assert_eq!(parse_fixed_date("2021-12-30", "%Y-%m-%d"), Some(date(2021, 12, 30)));
    }

    #[test]
    fn fixed_date_rejects_short_fields() {
        assert_eq!(parse_fixed_date("1.3.2021", "%d.%m.%Y"), None);
        assert_eq!(parse_fixed_date("01.03.21", "%d.%m.%Y"), None);
        assert_eq!(parse_fixed_date("2021-1-05", "%Y-%m-%d"), None);
        assert_eq!(parse_fixed_date("21-01-05", "%Y-%m-%d"), None);
    }

    #[test]
    fn fixed_date_rejects_whitespace_and_trailing_text() {
        assert_eq!(parse_fixed_date(" 01.03.2021", "%d.%m.%Y"), None);
        assert_eq!(parse_fixed_date("01.03.2021 ", "%d.%m.%Y"), None);
        assert_eq!(parse_fixed_date("2021-12-301", "%Y-%m-%d"), None);
    }

    #[test]
    fn fixed_date_rejects_wrong_separator_and_impossible_dates() {
        assert_eq!(parse_fixed_date("01-03-2021", "%d.%m.%Y"), None);
        assert_eq!(parse_fixed_date("2021-13-40", "%Y-%m-%d"), None);
        assert_eq!(parse_fixed_date("31.02.2021", "%d.%m.%Y"), None);
    }

    #[test]
    fn filter_keeps_boundary_dates() {
        let txs = vec![
            posted(date(2021, 11, 30), "before"),
            posted(date(2021, 12, 1), "first day"),
            posted(date(2021, 12, 15), "middle"),
            posted(date(2021, 12, 30), "last day"),
            posted(date(2021, 12, 31), "after"),
        ];
        let range = DateRange::new(date(2021, 12, 1), date(2021, 12, 30));
        let kept: Vec<String> = filter_by_range(txs, range)
            .iter()
            .map(|tx| tx.description().to_string())
            .collect();
        assert_eq!(kept, vec!["first day", "middle", "last day"]);
    }

    #[test]
    fn filter_with_inverted_range_is_empty() {
        let txs = vec![posted(date(2021, 12, 15), "middle")];
        let range = DateRange::new(date(2021, 12, 30), date(2021, 12, 1));
        assert!(filter_by_range(txs, range).is_empty());
    }
}
