use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use alert_lens::analysis::{analyze, AnalysisRequest};
use alert_lens::config::Config;
use alert_lens::loader::{DatasetReader, FsDatasetReader};
use alert_lens::render::{render_chart_png, render_network_png};
use alert_lens::report::ReportArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut out_dir = PathBuf::from(".");
    if let Some(pos) = args.iter().position(|a| a == "--out") {
        let dir = args
            .get(pos + 1)
            .cloned()
            .ok_or_else(|| anyhow!("`--out` requires a directory"))?;
        out_dir = PathBuf::from(dir);
        args.drain(pos..pos + 2);
    }

    let config = Config::load()?;
    let parsed = ReportArgs::parse(&args, &config)?;
    let key = parsed.key();
    let dataset = FsDatasetReader::new(&config.data.dir)
        .load(&key)
        .with_context(|| format!("failed to load {}", key))?;

    let mut window = config.estimator.clone();
    window.window_len = parsed.window_len;
    window.offset = parsed.offset;
    let request =
        AnalysisRequest::new(key, window, config.chart.clone()).with_network_day(parsed.day);
    let view = analyze(&dataset, &request);

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    render_chart_png(&view, &out_dir.join("chart.png"))?;
    if let (Some(day), Some(graph)) = (view.network_day, view.graph.as_ref()) {
        render_network_png(graph, day, &out_dir.join("network.png"))?;
    }
    println!("post-alert return: {}", view.report.estimate);
    Ok(())
}
