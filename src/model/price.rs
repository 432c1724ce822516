use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How a day's return is derived from consecutive closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// (close[t] - close[t-1]) / close[t-1]
    #[default]
    PercentChange,
    /// close[t] - close[t-1]
    Difference,
}

impl ReturnKind {
    pub fn label(self) -> &'static str {
        match self {
            ReturnKind::PercentChange => "pct",
            ReturnKind::Difference => "diff",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ReturnKind::PercentChange => ReturnKind::Difference,
            ReturnKind::Difference => ReturnKind::PercentChange,
        }
    }

    fn apply(self, prev_close: f64, close: f64) -> Option<f64> {
        match self {
            ReturnKind::Difference => Some(close - prev_close),
            ReturnKind::PercentChange => {
                if prev_close.abs() <= f64::EPSILON {
                    None
                } else {
                    Some((close - prev_close) / prev_close)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes keyed by date. Dates are unique and strictly increasing.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AppError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AppError::UnorderedPrices {
                    prev: pair[0].date.to_string(),
                    next: pair[1].date.to_string(),
                });
            }
        }
        Ok(Self { points })
    }

    pub fn from_closes(closes: &[(NaiveDate, f64)]) -> Result<Self, AppError> {
        Self::new(
            closes
                .iter()
                .map(|&(date, close)| PricePoint { date, close })
                .collect(),
        )
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.points.binary_search_by_key(&date, |p| p.date).ok()
    }

    /// Index of the first observation on or after `date`.
    pub fn index_on_or_after(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.points.partition_point(|p| p.date < date);
        (idx < self.points.len()).then_some(idx)
    }

    /// Return at position `idx`. Absent for the first element.
    pub fn return_at(&self, idx: usize, kind: ReturnKind) -> Option<f64> {
        if idx == 0 || idx >= self.points.len() {
            return None;
        }
        kind.apply(self.points[idx - 1].close, self.points[idx].close)
    }

    pub fn return_on(&self, date: NaiveDate, kind: ReturnKind) -> Option<f64> {
        self.index_of(date).and_then(|i| self.return_at(i, kind))
    }

    /// Per-day changes of the sub-series starting at `start`. The first
    /// observation of the sub-series has no change and is omitted.
    pub fn changes_since(&self, start: NaiveDate, kind: ReturnKind) -> Vec<(NaiveDate, f64)> {
        let Some(from) = self.index_on_or_after(start) else {
            return Vec::new();
        };
        self.points[from..]
            .windows(2)
            .filter_map(|pair| {
                kind.apply(pair[0].close, pair[1].close)
                    .map(|v| (pair[1].date, v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_duplicate_and_descending_dates() {
        assert!(PriceSeries::from_closes(&[(d(2024, 1, 2), 1.0), (d(2024, 1, 2), 2.0)]).is_err());
        assert!(PriceSeries::from_closes(&[(d(2024, 1, 3), 1.0), (d(2024, 1, 2), 2.0)]).is_err());
        assert!(PriceSeries::from_closes(&[]).unwrap().is_empty());
    }

    #[test]
    fn first_return_is_absent() {
        let s = PriceSeries::from_closes(&[(d(2024, 1, 2), 10.0), (d(2024, 1, 3), 11.0)]).unwrap();
        assert_eq!(s.return_on(d(2024, 1, 2), ReturnKind::PercentChange), None);
        let r = s.return_on(d(2024, 1, 3), ReturnKind::PercentChange).unwrap();
        assert!((r - 0.1).abs() < 1e-12);
        let diff = s.return_on(d(2024, 1, 3), ReturnKind::Difference).unwrap();
        assert!((diff - 1.0).abs() < 1e-12);
    }

    #[test]
    fn percent_change_from_zero_close_is_undefined() {
        let s = PriceSeries::from_closes(&[(d(2024, 1, 2), 0.0), (d(2024, 1, 3), 1.0)]).unwrap();
        assert_eq!(s.return_on(d(2024, 1, 3), ReturnKind::PercentChange), None);
        assert_eq!(s.return_on(d(2024, 1, 3), ReturnKind::Difference), Some(1.0));
    }

    #[test]
    fn changes_since_drops_first_point_of_slice() {
        let s = PriceSeries::from_closes(&[
            (d(2023, 12, 29), 5.0),
            (d(2024, 1, 2), 6.0),
            (d(2024, 1, 3), 8.0),
        ])
        .unwrap();
        let changes = s.changes_since(d(2024, 1, 1), ReturnKind::Difference);
        assert_eq!(changes, vec![(d(2024, 1, 3), 2.0)]);
        assert!(s.changes_since(d(2025, 1, 1), ReturnKind::Difference).is_empty());
    }
}
