//! PNG output of the change chart and the day network.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use plotters::prelude::*;

use crate::analysis::AnalysisView;
use crate::network::{GraphNode, InteractionGraph, NodeRole};

const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);

pub fn render_chart_png(view: &AnalysisView, path: &Path) -> Result<()> {
    let points = &view.chart_points;
    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last()) else {
        bail!("no price changes to plot for {}", view.key);
    };
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.05).max(1e-6);
    let (y0, y1) = (min - pad, max + pad);

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "{} Close Price with Highlighted Dates",
                view.key.ticker.to_ascii_uppercase()
            ),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(first..last, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Close Price")
        .draw()?;

    let in_range = |d: NaiveDate| d >= first && d <= last;
    chart.draw_series(
        view.overlays
            .iter()
            .filter(|o| o.span_end >= first && o.date <= last)
            .map(|o| {
                Rectangle::new(
                    [(o.date.max(first), y0), (o.span_end.min(last), y1)],
                    BLACK.mix(0.12).filled(),
                )
            }),
    )?;
    chart.draw_series(
        view.overlays
            .iter()
            .filter(|o| in_range(o.date))
            .map(|o| PathElement::new(vec![(o.date, y0), (o.date, y1)], RED.mix(0.7))),
    )?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))?
        .label("Close Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path = %path.display(), points = points.len(), "chart written");
    Ok(())
}

/// Authors in the left column, counterparts in the right, each column
/// spread evenly over the unit height in key order.
pub fn bipartite_layout(graph: &InteractionGraph) -> HashMap<GraphNode, (f64, f64)> {
    let mut out = HashMap::new();
    for (role, x) in [(NodeRole::Author, 0.2), (NodeRole::Counterpart, 0.8)] {
        let keys = graph.keys_with_role(role);
        let n = keys.len();
        for (i, key) in keys.into_iter().enumerate() {
            let y = 1.0 - (i as f64 + 1.0) / (n as f64 + 1.0);
            out.insert(GraphNode { key, role }, (x, y));
        }
    }
    out
}

pub fn render_network_png(graph: &InteractionGraph, day: NaiveDate, path: &Path) -> Result<()> {
    if graph.is_empty() {
        bail!("no interactions on {}", day);
    }
    let layout = bipartite_layout(graph);

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Title-Body Network Graph for {}", day), ("sans-serif", 24))
        .margin(20)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;

    let pos = |key: &str, role: NodeRole| {
        layout
            .get(&GraphNode {
                key: key.to_string(),
                role,
            })
            .copied()
    };
    chart.draw_series(graph.edges().iter().filter_map(|(a, c)| {
        let from = pos(a, NodeRole::Author)?;
        let to = pos(c, NodeRole::Counterpart)?;
        Some(PathElement::new(vec![from, to], RGBColor(128, 128, 128)))
    }))?;

    for (node, &(x, y)) in &layout {
        let color = match node.role {
            NodeRole::Author => LIGHT_BLUE,
            NodeRole::Counterpart => LIGHT_GREEN,
        };
        chart.draw_series(std::iter::once(Circle::new((x, y), 14, color.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            node.key.clone(),
            (x, y),
            ("sans-serif", 12).into_font(),
        )))?;
    }

    root.present()?;
    tracing::info!(path = %path.display(), nodes = graph.node_count(), "network written");
    Ok(())
}
