use alert_lens::analysis::AnalysisRequest;
use alert_lens::config::{ChartConfig, Config};
use alert_lens::event_window::EventWindowConfig;
use alert_lens::loader::{Dataset, DatasetKey};
use alert_lens::model::alert::AlertEntry;
use alert_lens::model::interaction::InteractionRow;
use alert_lens::model::price::PriceSeries;
use alert_lens::report::{build_report, render_text, ReportArgs};
use chrono::NaiveDate;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn config() -> Config {
    toml::from_str(
        r#"
[data]
dir = "data"
tickers = ["amc", "gme"]
"#,
    )
    .unwrap()
}

fn dataset() -> Dataset {
    Dataset {
        key: DatasetKey::new("amc", 30, 20),
        prices: PriceSeries::from_closes(&[
            (d(1), 10.0),
            (d(2), 11.0),
            (d(3), 12.1),
            (d(4), 13.31),
        ])
        .unwrap(),
        alerts: vec![
            AlertEntry::Valid(d(1)),
            AlertEntry::Valid(d(2)),
            AlertEntry::Invalid("??".to_string()),
        ],
        interactions: vec![InteractionRow::new(d(2), Some("a"), "b")],
        row_errors: Vec::new(),
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn report_args_default_to_config() {
    let parsed = ReportArgs::parse(&[], &config()).expect("parse");
    assert_eq!(parsed.ticker, "amc");
    assert_eq!(parsed.i, 30);
    assert_eq!(parsed.network_days, 20);
    assert_eq!(parsed.window_len, 10);
    assert_eq!(parsed.offset, 1);
    assert_eq!(parsed.day, None);
    assert!(!parsed.json);
}

#[test]
fn report_args_override_and_reject_unknown_flags() {
    let parsed = ReportArgs::parse(
        &args(&[
            "--ticker", "GME", "--i", "35", "--network-days", "25", "--window", "3", "--offset",
            "0", "--day", "2024-01-02", "--json",
        ]),
        &config(),
    )
    .expect("parse");
    assert_eq!(parsed.key(), DatasetKey::new("gme", 35, 25));
    assert_eq!(parsed.window_len, 3);
    assert_eq!(parsed.offset, 0);
    assert_eq!(parsed.day, Some(d(2)));
    assert!(parsed.json);

    assert!(ReportArgs::parse(&args(&["--bogus", "1"]), &config()).is_err());
    assert!(ReportArgs::parse(&args(&["--i"]), &config()).is_err());
    assert!(ReportArgs::parse(&args(&["--i", "x"]), &config()).is_err());
    assert!(ReportArgs::parse(&args(&["--day", "soon"]), &config()).is_err());
}

#[test]
fn report_contains_estimate_windows_and_network() {
    let window = EventWindowConfig {
        window_len: 2,
        ..EventWindowConfig::default()
    };
    let request = AnalysisRequest::new(
        DatasetKey::new("amc", 30, 20),
        window,
        ChartConfig::default(),
    )
    .with_network_day(Some(d(2)));
    let doc = build_report(&dataset(), &request);

    assert_eq!(doc.windows.len(), 2);
    assert_eq!(doc.skipped, 0);
    assert_eq!(doc.invalid_alerts, vec!["??".to_string()]);
    let network = doc.network.as_ref().expect("network");
    assert_eq!(network.edges, vec![("a".to_string(), "b".to_string())]);

    let text = render_text(&doc);
    assert!(text.contains("post-alert return: mean"));
    assert!(text.contains("invalid alerts: ??"));
    assert!(text.contains("a -- b"));

    let json = serde_json::to_value(&doc).expect("json");
    assert_eq!(json["estimate"]["status"], "estimate");
    assert_eq!(json["estimate"]["count"], 2);
    assert_eq!(json["network"]["nodes"][0]["role"], "author");
}

#[test]
fn report_marks_empty_estimate_explicitly() {
    let request = AnalysisRequest::new(
        DatasetKey::new("amc", 30, 20),
        EventWindowConfig::default(),
        ChartConfig::default(),
    );
    let doc = build_report(&dataset(), &request);

    assert!(doc.windows.is_empty());
    assert_eq!(doc.skipped, 2);
    assert!(doc.network.is_none());
    assert!(render_text(&doc).contains("post-alert return: no valid data points"));

    let json = serde_json::to_value(&doc).expect("json");
    assert_eq!(json["estimate"]["status"], "no_valid_data");
    assert!(json["estimate"].get("mean").is_none());
}
