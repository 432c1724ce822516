use chrono::{Duration, NaiveDate};

use crate::event_window::types::{
    EventWindowConfig, EventWindowReport, ReturnEstimate, ReturnStats, WindowCalendar,
    WindowReturn,
};
use crate::model::alert::{valid_alert_dates, AlertEntry};
use crate::model::price::{PriceSeries, ReturnKind};

/// Windowed return after each alert, percent-change returns over calendar
/// days. Alerts without full coverage are skipped; output order follows
/// `alerts`.
pub fn compute_post_alert_returns(
    prices: &PriceSeries,
    alerts: &[NaiveDate],
    window_len: usize,
    offset: i64,
) -> Vec<f64> {
    post_alert_windows(
        prices,
        alerts,
        window_len,
        offset,
        ReturnKind::PercentChange,
        WindowCalendar::CalendarDays,
    )
    .into_iter()
    .map(|w| w.value)
    .collect()
}

pub fn post_alert_windows(
    prices: &PriceSeries,
    alerts: &[NaiveDate],
    window_len: usize,
    offset: i64,
    kind: ReturnKind,
    calendar: WindowCalendar,
) -> Vec<WindowReturn> {
    alerts
        .iter()
        .filter_map(|&alert| {
            let window = match calendar {
                WindowCalendar::CalendarDays => {
                    calendar_window(prices, alert, window_len, offset, kind)
                }
                WindowCalendar::TradingDays => {
                    trading_window(prices, alert, window_len, offset, kind)
                }
            };
            if window.is_none() {
                tracing::debug!(alert = %alert, window_len, offset, "alert window lacks coverage");
            }
            window
        })
        .collect()
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

fn calendar_window(
    prices: &PriceSeries,
    alert: NaiveDate,
    window_len: usize,
    offset: i64,
    kind: ReturnKind,
) -> Option<WindowReturn> {
    if window_len == 0 {
        return None;
    }
    let start = shift(alert, offset)?;
    let mut value = 0.0;
    let mut day = start;
    for k in 0..window_len {
        if k > 0 {
            day = day.succ_opt()?;
        }
        value += prices.return_on(day, kind)?;
    }
    Some(WindowReturn {
        alert,
        start,
        end: day,
        value,
    })
}

fn trading_window(
    prices: &PriceSeries,
    alert: NaiveDate,
    window_len: usize,
    offset: i64,
    kind: ReturnKind,
) -> Option<WindowReturn> {
    if window_len == 0 {
        return None;
    }
    let first = prices.index_on_or_after(shift(alert, offset)?)?;
    let last = first.checked_add(window_len - 1)?;
    if last >= prices.len() {
        return None;
    }
    let mut value = 0.0;
    for idx in first..=last {
        value += prices.return_at(idx, kind)?;
    }
    let points = prices.points();
    Some(WindowReturn {
        alert,
        start: points[first].date,
        end: points[last].date,
        value,
    })
}

/// Mean and population variance. Empty input has no estimate.
pub fn aggregate(returns: &[f64]) -> ReturnEstimate {
    if returns.is_empty() {
        return ReturnEstimate::NoValidData;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    ReturnEstimate::Estimate(ReturnStats {
        count: returns.len(),
        mean,
        variance,
    })
}

#[derive(Debug, Clone, Default)]
pub struct EventWindowEstimator {
    cfg: EventWindowConfig,
}

impl EventWindowEstimator {
    pub fn new(cfg: EventWindowConfig) -> Self {
        Self { cfg }
    }

    pub fn estimate(&self, prices: &PriceSeries, alerts: &[AlertEntry]) -> EventWindowReport {
        let valid = valid_alert_dates(alerts);
        let invalid = alerts.len() - valid.len();
        let windows = post_alert_windows(
            prices,
            &valid,
            self.cfg.window_len,
            self.cfg.offset,
            self.cfg.return_kind,
            self.cfg.calendar,
        );
        let values: Vec<f64> = windows.iter().map(|w| w.value).collect();
        let estimate = aggregate(&values);
        EventWindowReport {
            config: self.cfg.clone(),
            skipped: valid.len() - windows.len(),
            invalid,
            windows,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zero_length_window_covers_nothing() {
        let prices =
            PriceSeries::from_closes(&[(d(2024, 1, 1), 1.0), (d(2024, 1, 2), 2.0)]).unwrap();
        assert!(compute_post_alert_returns(&prices, &[d(2024, 1, 1)], 0, 1).is_empty());
    }

    #[test]
    fn aggregate_single_value_has_zero_variance() {
        let est = aggregate(&[0.25]);
        assert_eq!(est.mean(), Some(0.25));
        assert_eq!(est.variance(), Some(0.0));
    }

    #[test]
    fn negative_offset_reaches_back() {
        let prices = PriceSeries::from_closes(&[
            (d(2024, 1, 1), 100.0),
            (d(2024, 1, 2), 110.0),
            (d(2024, 1, 3), 121.0),
        ])
        .unwrap();
        let out = compute_post_alert_returns(&prices, &[d(2024, 1, 3)], 1, -1);
        assert_eq!(out.len(), 1);
        assert!((out[0] - 0.1).abs() < 1e-12);
    }
}
