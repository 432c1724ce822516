use alert_lens::event_window::{
    aggregate, compute_post_alert_returns, post_alert_windows, EventWindowConfig,
    EventWindowEstimator, ReturnEstimate, WindowCalendar,
};
use alert_lens::model::alert::AlertEntry;
use alert_lens::model::price::{PriceSeries, ReturnKind};
use chrono::NaiveDate;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

/// Mon 1st .. Fri 5th, then Mon 8th; each close is 10% above the previous.
fn weekly_series() -> PriceSeries {
    PriceSeries::from_closes(&[
        (d(1), 100.0),
        (d(2), 110.0),
        (d(3), 121.0),
        (d(4), 133.1),
        (d(5), 146.41),
        (d(8), 161.051),
    ])
    .unwrap()
}

#[test]
fn sums_daily_returns_over_covered_window() {
    let prices = weekly_series();
    let out = compute_post_alert_returns(&prices, &[d(1)], 2, 1);
    assert_eq!(out.len(), 1);
    assert!((out[0] - 0.2).abs() < 1e-9);
}

#[test]
fn output_never_exceeds_alert_count() {
    let prices = weekly_series();
    let alerts = vec![d(1), d(1), d(2), d(3), d(4), d(5), d(8)];
    for window_len in 0..8 {
        for offset in -2..4 {
            let out = compute_post_alert_returns(&prices, &alerts, window_len, offset);
            assert!(out.len() <= alerts.len());
        }
    }
}

#[test]
fn duplicate_alerts_each_contribute_in_order() {
    let prices = weekly_series();
    let out = compute_post_alert_returns(&prices, &[d(2), d(1), d(2)], 1, 1);
    assert_eq!(out.len(), 3);
    for v in out {
        assert!((v - 0.1).abs() < 1e-9);
    }
}

#[test]
fn alert_on_last_trading_day_contributes_nothing() {
    let prices = weekly_series();
    assert!(compute_post_alert_returns(&prices, &[d(8)], 10, 1).is_empty());
    let trading = post_alert_windows(
        &prices,
        &[d(8)],
        10,
        1,
        ReturnKind::PercentChange,
        WindowCalendar::TradingDays,
    );
    assert!(trading.is_empty());
}

#[test]
fn weekend_gap_drops_calendar_window_but_not_trading_window() {
    let prices = weekly_series();
    let calendar = post_alert_windows(
        &prices,
        &[d(4)],
        2,
        1,
        ReturnKind::PercentChange,
        WindowCalendar::CalendarDays,
    );
    assert!(calendar.is_empty());

    let trading = post_alert_windows(
        &prices,
        &[d(4)],
        2,
        1,
        ReturnKind::PercentChange,
        WindowCalendar::TradingDays,
    );
    assert_eq!(trading.len(), 1);
    assert_eq!(trading[0].start, d(5));
    assert_eq!(trading[0].end, d(8));
    assert!((trading[0].value - 0.2).abs() < 1e-9);
}

#[test]
fn oversized_trading_window_is_skipped() {
    let prices = weekly_series();
    for calendar in [WindowCalendar::TradingDays, WindowCalendar::CalendarDays] {
        let out = post_alert_windows(
            &prices,
            &[d(2)],
            usize::MAX,
            1,
            ReturnKind::PercentChange,
            calendar,
        );
        assert!(out.is_empty(), "{:?} produced {:?}", calendar, out);
    }

    let report = EventWindowEstimator::new(EventWindowConfig {
        window_len: usize::MAX,
        calendar: WindowCalendar::TradingDays,
        ..EventWindowConfig::default()
    })
    .estimate(&prices, &[AlertEntry::Valid(d(2))]);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.estimate, ReturnEstimate::NoValidData);
}

#[test]
fn window_touching_first_observation_is_skipped() {
    // The first close has no return, so a window that includes it is partial.
    let prices = weekly_series();
    assert!(compute_post_alert_returns(&prices, &[d(1)], 1, 0).is_empty());
}

#[test]
fn difference_returns_use_raw_close_changes() {
    let prices = weekly_series();
    let out = post_alert_windows(
        &prices,
        &[d(1)],
        2,
        1,
        ReturnKind::Difference,
        WindowCalendar::CalendarDays,
    );
    assert_eq!(out.len(), 1);
    assert!((out[0].value - 21.0).abs() < 1e-9);
}

#[test]
fn aggregate_of_empty_is_explicit_no_data() {
    let est = aggregate(&[]);
    assert_eq!(est, ReturnEstimate::NoValidData);
    assert_eq!(est.mean(), None);
    assert_eq!(est.variance(), None);
    assert_eq!(est.to_string(), "no valid data points");
}

#[test]
fn aggregate_uses_population_variance() {
    let est = aggregate(&[0.01, -0.01]);
    let stats = est.stats().expect("estimate");
    assert_eq!(stats.count, 2);
    assert!(stats.mean.abs() < 1e-15);
    assert!((stats.variance - 0.0001).abs() < 1e-12);
}

#[test]
fn estimator_excludes_invalid_alerts_and_counts_skips() {
    let prices = weekly_series();
    let alerts = vec![
        AlertEntry::Valid(d(1)),
        AlertEntry::Invalid("not-a-date".to_string()),
        AlertEntry::Valid(d(8)),
    ];
    let estimator = EventWindowEstimator::new(EventWindowConfig {
        window_len: 2,
        offset: 1,
        return_kind: ReturnKind::PercentChange,
        calendar: WindowCalendar::CalendarDays,
    });
    let report = estimator.estimate(&prices, &alerts);

    assert_eq!(report.covered(), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.windows[0].alert, d(1));
    assert!((report.estimate.mean().unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn estimator_reports_no_data_when_nothing_is_covered() {
    let prices = weekly_series();
    let report = EventWindowEstimator::default().estimate(&prices, &[AlertEntry::Valid(d(5))]);
    assert_eq!(report.covered(), 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.estimate, ReturnEstimate::NoValidData);
}
