use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config::ChartConfig;
use crate::event_window::{EventWindowConfig, EventWindowEstimator, EventWindowReport};
use crate::loader::{Dataset, DatasetKey};
use crate::model::alert::invalid_alert_texts;
use crate::model::price::ReturnKind;
use crate::network::{build_day_graph, interaction_days, InteractionGraph};

/// Everything one dashboard refresh depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub key: DatasetKey,
    pub window: EventWindowConfig,
    pub chart: ChartConfig,
    pub network_day: Option<NaiveDate>,
}

impl AnalysisRequest {
    pub fn new(key: DatasetKey, window: EventWindowConfig, chart: ChartConfig) -> Self {
        Self {
            key,
            window,
            chart,
            network_day: None,
        }
    }

    pub fn with_network_day(mut self, day: Option<NaiveDate>) -> Self {
        self.network_day = day;
        self
    }
}

/// Vertical marker plus shaded span for one alert on the change chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertOverlay {
    pub date: NaiveDate,
    pub span_end: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub key: DatasetKey,
    /// Close-to-close differences from `chart.start` on.
    pub chart_points: Vec<(NaiveDate, f64)>,
    pub overlays: Vec<AlertOverlay>,
    pub invalid_alerts: Vec<String>,
    pub report: EventWindowReport,
    pub network_days: Vec<NaiveDate>,
    pub network_day: Option<NaiveDate>,
    pub graph: Option<InteractionGraph>,
}

pub fn analyze(dataset: &Dataset, request: &AnalysisRequest) -> AnalysisView {
    let chart_points = dataset
        .prices
        .changes_since(request.chart.start, ReturnKind::Difference);

    let span = Duration::try_days(request.chart.highlight_days).unwrap_or_else(Duration::zero);
    let overlays = dataset
        .alerts
        .iter()
        .filter_map(|a| a.date())
        .map(|date| AlertOverlay {
            date,
            span_end: date.checked_add_signed(span).unwrap_or(date),
        })
        .collect();

    let report = EventWindowEstimator::new(request.window.clone())
        .estimate(&dataset.prices, &dataset.alerts);

    let network_days = interaction_days(&dataset.interactions);
    let graph = request
        .network_day
        .map(|day| build_day_graph(&dataset.interactions, day));

    AnalysisView {
        key: dataset.key.clone(),
        chart_points,
        overlays,
        invalid_alerts: invalid_alert_texts(&dataset.alerts),
        report,
        network_days,
        network_day: request.network_day,
        graph,
    }
}
