use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::price::ReturnKind;

/// Which days make up an event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCalendar {
    /// `window_len` consecutive calendar days; any day without a return
    /// (weekend, holiday, end of data) drops the alert.
    #[default]
    CalendarDays,
    /// `window_len` consecutive observations, starting at the first one on or
    /// after the window start.
    TradingDays,
}

impl WindowCalendar {
    pub fn label(self) -> &'static str {
        match self {
            WindowCalendar::CalendarDays => "calendar",
            WindowCalendar::TradingDays => "trading",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WindowCalendar::CalendarDays => WindowCalendar::TradingDays,
            WindowCalendar::TradingDays => WindowCalendar::CalendarDays,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWindowConfig {
    pub window_len: usize,
    pub offset: i64,
    pub return_kind: ReturnKind,
    pub calendar: WindowCalendar,
}

impl Default for EventWindowConfig {
    fn default() -> Self {
        Self {
            window_len: 10,
            offset: 1,
            return_kind: ReturnKind::PercentChange,
            calendar: WindowCalendar::CalendarDays,
        }
    }
}

/// Summed return over one fully covered window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReturn {
    pub alert: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnStats {
    pub count: usize,
    pub mean: f64,
    /// Population variance (denominator = count).
    pub variance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReturnEstimate {
    NoValidData,
    Estimate(ReturnStats),
}

impl ReturnEstimate {
    pub fn stats(&self) -> Option<&ReturnStats> {
        match self {
            ReturnEstimate::Estimate(s) => Some(s),
            ReturnEstimate::NoValidData => None,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        self.stats().map(|s| s.mean)
    }

    pub fn variance(&self) -> Option<f64> {
        self.stats().map(|s| s.variance)
    }
}

impl fmt::Display for ReturnEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnEstimate::NoValidData => write!(f, "no valid data points"),
            ReturnEstimate::Estimate(s) => write!(
                f,
                "mean {:.6} | variance {:.6} | n={}",
                s.mean, s.variance, s.count
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventWindowReport {
    pub config: EventWindowConfig,
    pub windows: Vec<WindowReturn>,
    /// Valid alerts whose window lacked full coverage.
    pub skipped: usize,
    /// Alert lines that were not dates.
    pub invalid: usize,
    pub estimate: ReturnEstimate,
}

impl EventWindowReport {
    pub fn covered(&self) -> usize {
        self.windows.len()
    }
}
