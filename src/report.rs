use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{analyze, AnalysisRequest};
use crate::config::Config;
use crate::event_window::{ReturnEstimate, WindowReturn};
use crate::loader::{Dataset, DatasetKey, DatasetReader, FsDatasetReader, RowError};
use crate::model::parse_date;
use crate::network::GraphNode;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportArgs {
    pub ticker: String,
    pub i: u32,
    pub network_days: u32,
    pub window_len: usize,
    pub offset: i64,
    pub day: Option<NaiveDate>,
    pub json: bool,
}

impl ReportArgs {
    /// Parse `--flag value` pairs on top of the configured defaults.
    pub fn parse(args: &[String], config: &Config) -> Result<Self> {
        let mut out = Self {
            ticker: config
                .data
                .ticker_list()
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("no tickers configured"))?,
            i: config.data.default_i,
            network_days: config.data.default_network_days,
            window_len: config.estimator.window_len,
            offset: config.estimator.offset,
            day: None,
            json: false,
        };

        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            if flag == "--json" {
                out.json = true;
                continue;
            }
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("`{}` requires a value", flag))?;
            match flag.as_str() {
                "--ticker" => out.ticker = value.trim().to_ascii_lowercase(),
                "--i" => out.i = value.parse().with_context(|| format!("invalid --i `{}`", value))?,
                "--network-days" => {
                    out.network_days = value
                        .parse()
                        .with_context(|| format!("invalid --network-days `{}`", value))?
                }
                "--window" => {
                    out.window_len = value
                        .parse()
                        .with_context(|| format!("invalid --window `{}`", value))?
                }
                "--offset" => {
                    out.offset = value
                        .parse()
                        .with_context(|| format!("invalid --offset `{}`", value))?
                }
                "--day" => {
                    out.day = Some(
                        parse_date(value).ok_or_else(|| anyhow!("invalid --day `{}`", value))?,
                    )
                }
                other => bail!(
                    "unknown flag `{}`. expected one of: --ticker --i --network-days --window --offset --day --json",
                    other
                ),
            }
        }
        Ok(out)
    }

    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(&self.ticker, self.i, self.network_days)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkDocument {
    pub day: NaiveDate,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub dataset: DatasetKey,
    pub estimate: ReturnEstimate,
    pub windows: Vec<WindowReturn>,
    pub skipped: usize,
    pub invalid_alerts: Vec<String>,
    pub row_errors: Vec<RowError>,
    pub network: Option<NetworkDocument>,
}

pub fn build_report(dataset: &Dataset, request: &AnalysisRequest) -> ReportDocument {
    let view = analyze(dataset, request);
    let network = match (view.network_day, view.graph) {
        (Some(day), Some(graph)) => Some(NetworkDocument {
            day,
            nodes: graph.nodes(),
            edges: graph.edges(),
        }),
        _ => None,
    };
    ReportDocument {
        dataset: view.key,
        estimate: view.report.estimate,
        windows: view.report.windows,
        skipped: view.report.skipped,
        invalid_alerts: view.invalid_alerts,
        row_errors: dataset.row_errors.clone(),
        network,
    }
}

pub fn render_text(doc: &ReportDocument) -> String {
    let mut lines = vec![
        doc.dataset.to_string(),
        format!("post-alert return: {}", doc.estimate),
        format!(
            "windows: {} covered, {} skipped",
            doc.windows.len(),
            doc.skipped
        ),
    ];
    lines.extend(
        doc.windows
            .iter()
            .map(|w| format!("  {} [{} .. {}] {:+.6}", w.alert, w.start, w.end, w.value)),
    );
    if !doc.invalid_alerts.is_empty() {
        lines.push(format!("invalid alerts: {}", doc.invalid_alerts.join(", ")));
    }
    if !doc.row_errors.is_empty() {
        lines.push(format!("skipped rows: {}", doc.row_errors.len()));
    }
    if let Some(net) = &doc.network {
        lines.push(format!(
            "network {}: {} nodes, {} edges",
            net.day,
            net.nodes.len(),
            net.edges.len()
        ));
        lines.extend(
            net.edges
                .iter()
                .map(|(author, counterpart)| format!("  {} -- {}", author, counterpart)),
        );
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn run_cli(args: &[String]) -> Result<()> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    let config = Config::load()?;
    let parsed = ReportArgs::parse(args, &config)?;
    let key = parsed.key();
    let reader = FsDatasetReader::new(&config.data.dir);
    let dataset = reader
        .load(&key)
        .with_context(|| format!("failed to load {}", key))?;

    let mut window = config.estimator.clone();
    window.window_len = parsed.window_len;
    window.offset = parsed.offset;
    let request =
        AnalysisRequest::new(key, window, config.chart.clone()).with_network_day(parsed.day);
    let doc = build_report(&dataset, &request);

    if parsed.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_text(&doc));
    }
    Ok(())
}

fn print_usage() {
    println!(
        "usage: alert-lens-report [--ticker T] [--i N] [--network-days N] [--window N] [--offset N] [--day YYYY-MM-DD] [--json]"
    );
}
