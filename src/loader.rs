//! Typed loading of the per-selection input files.
//!
//! A selection is keyed by ticker plus the two integer parameters `I` and
//! `network_days`. Each selection has three files in the data directory:
//!
//! - `financial_{ticker}_{i}_{network_days}.csv`: daily closes
//! - `df_{ticker}_{i}_{network_days}.csv`: author/counterpart interactions
//! - `alert_dates_{ticker}_{i}_{network_days}.txt`: one alert date per line
//!
//! Malformed rows are skipped and reported as `RowError`s; missing files or
//! columns fail the whole selection.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use crate::error::AppError;
use crate::model::alert::{parse_alert_lines, AlertEntry};
use crate::model::interaction::InteractionRow;
use crate::model::parse_date;
use crate::model::price::{PricePoint, PriceSeries};

const DATE_COLUMNS: [&str; 3] = ["Date", "Unnamed: 0", ""];
const CLOSE_COLUMN: &str = "Close";
const AUTHOR_COLUMN: &str = "author_y";
const COUNTERPART_COLUMN: &str = "author_x";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetKey {
    pub ticker: String,
    pub i: u32,
    pub network_days: u32,
}

impl DatasetKey {
    pub fn new(ticker: &str, i: u32, network_days: u32) -> Self {
        Self {
            ticker: ticker.trim().to_ascii_lowercase(),
            i,
            network_days,
        }
    }

    fn suffix(&self) -> String {
        format!("{}_{}_{}", self.ticker, self.i, self.network_days)
    }

    pub fn financial_file(&self) -> String {
        format!("financial_{}.csv", self.suffix())
    }

    pub fn interactions_file(&self) -> String {
        format!("df_{}.csv", self.suffix())
    }

    pub fn alerts_file(&self) -> String {
        format!("alert_dates_{}.txt", self.suffix())
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (I={}, network_days={})",
            self.ticker.to_ascii_uppercase(),
            self.i,
            self.network_days
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub file: String,
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub key: DatasetKey,
    pub prices: PriceSeries,
    pub alerts: Vec<AlertEntry>,
    pub interactions: Vec<InteractionRow>,
    pub row_errors: Vec<RowError>,
}

pub trait DatasetReader {
    fn load(&self, key: &DatasetKey) -> Result<Dataset, AppError>;
}

#[derive(Debug, Clone)]
pub struct FsDatasetReader {
    dir: PathBuf,
}

impl FsDatasetReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn open(&self, name: &str) -> Result<std::fs::File, AppError> {
        let path = self.dir.join(name);
        std::fs::File::open(&path).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })
    }
}

impl DatasetReader for FsDatasetReader {
    fn load(&self, key: &DatasetKey) -> Result<Dataset, AppError> {
        let mut row_errors = Vec::new();

        let financial = key.financial_file();
        let prices = read_prices(self.open(&financial)?, &financial, &mut row_errors)?;

        let interactions_name = key.interactions_file();
        let interactions = read_interactions(
            self.open(&interactions_name)?,
            &interactions_name,
            &mut row_errors,
        )?;

        let mut alerts_text = String::new();
        self.open(&key.alerts_file())?
            .read_to_string(&mut alerts_text)?;
        let alerts = parse_alert_lines(&alerts_text);

        tracing::info!(
            dataset = %key,
            prices = prices.len(),
            alerts = alerts.len(),
            interactions = interactions.len(),
            row_errors = row_errors.len(),
            "dataset loaded"
        );

        Ok(Dataset {
            key: key.clone(),
            prices,
            alerts,
            interactions,
            row_errors,
        })
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn push_error(errors: &mut Vec<RowError>, file: &str, line: u64, message: String) {
    tracing::warn!(file, line, %message, "skipping malformed row");
    errors.push(RowError {
        file: file.to_string(),
        line,
        message,
    });
}

/// Read daily closes. Dates must be strictly increasing after malformed
/// rows are dropped.
pub fn read_prices<R: Read>(
    input: R,
    file: &str,
    errors: &mut Vec<RowError>,
) -> Result<PriceSeries, AppError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = rdr.headers()?.clone();
    let date_idx = DATE_COLUMNS
        .iter()
        .find_map(|name| column(&headers, name))
        .unwrap_or(0);
    let close_idx = column(&headers, CLOSE_COLUMN).ok_or_else(|| AppError::MissingColumn {
        file: file.to_string(),
        column: CLOSE_COLUMN.to_string(),
    })?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                push_error(errors, file, line, e.to_string());
                continue;
            }
        };
        let line = record_line(&record);
        let raw_date = record.get(date_idx).unwrap_or("");
        let Some(date) = parse_date(raw_date) else {
            push_error(errors, file, line, format!("invalid date `{}`", raw_date));
            continue;
        };
        let raw_close = record.get(close_idx).unwrap_or("").trim();
        match raw_close.parse::<f64>() {
            Ok(close) if close.is_finite() => points.push(PricePoint { date, close }),
            _ => push_error(errors, file, line, format!("invalid close `{}`", raw_close)),
        }
    }

    PriceSeries::new(points)
}

/// Read interaction rows. The first column is the row date; an empty
/// `author_y` is kept as a missing author, an empty `author_x` drops the row.
pub fn read_interactions<R: Read>(
    input: R,
    file: &str,
    errors: &mut Vec<RowError>,
) -> Result<Vec<InteractionRow>, AppError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = rdr.headers()?.clone();
    let missing = |column: &str| AppError::MissingColumn {
        file: file.to_string(),
        column: column.to_string(),
    };
    let author_idx = column(&headers, AUTHOR_COLUMN).ok_or_else(|| missing(AUTHOR_COLUMN))?;
    let counterpart_idx =
        column(&headers, COUNTERPART_COLUMN).ok_or_else(|| missing(COUNTERPART_COLUMN))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                push_error(errors, file, line, e.to_string());
                continue;
            }
        };
        let line = record_line(&record);
        let raw_day = record.get(0).unwrap_or("");
        let Some(day) = parse_date(raw_day) else {
            push_error(errors, file, line, format!("invalid date `{}`", raw_day));
            continue;
        };
        let counterpart = record.get(counterpart_idx).unwrap_or("").trim();
        if counterpart.is_empty() {
            push_error(errors, file, line, "missing author_x".to_string());
            continue;
        }
        let author = record
            .get(author_idx)
            .map(str::trim)
            .filter(|a| !a.is_empty());
        rows.push(InteractionRow::new(day, author, counterpart));
    }
    Ok(rows)
}
