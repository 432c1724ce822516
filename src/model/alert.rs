use chrono::NaiveDate;
use serde::Serialize;

use super::parse_date;

/// One line of an alert-date list. Text that is not a date is kept as
/// `Invalid` so it can be reported, and never takes part in a computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum AlertEntry {
    Valid(NaiveDate),
    Invalid(String),
}

impl AlertEntry {
    pub fn parse(raw: &str) -> Self {
        match parse_date(raw) {
            Some(date) => AlertEntry::Valid(date),
            None => AlertEntry::Invalid(raw.trim().to_string()),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            AlertEntry::Valid(d) => Some(*d),
            AlertEntry::Invalid(_) => None,
        }
    }
}

/// Parse a newline separated alert list. Blank lines are ignored; duplicates
/// are kept in order.
pub fn parse_alert_lines(text: &str) -> Vec<AlertEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(AlertEntry::parse)
        .collect()
}

pub fn valid_alert_dates(entries: &[AlertEntry]) -> Vec<NaiveDate> {
    entries.iter().filter_map(AlertEntry::date).collect()
}

pub fn invalid_alert_texts(entries: &[AlertEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| match e {
            AlertEntry::Invalid(raw) => Some(raw.clone()),
            AlertEntry::Valid(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_duplicates_and_flags_bad_lines() {
        let entries = parse_alert_lines("2024-01-05\n\n2024-01-05\nsoon\n2024-02-01 00:00:00\n");
        assert_eq!(entries.len(), 4);
        assert_eq!(valid_alert_dates(&entries).len(), 3);
        assert_eq!(invalid_alert_texts(&entries), vec!["soon".to_string()]);
    }
}
