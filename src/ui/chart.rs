use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::analysis::AlertOverlay;

/// Close-to-close change series with a red marker on each alert and a gray
/// band over the days that follow it.
pub struct ChangeChart<'a> {
    points: &'a [(NaiveDate, f64)],
    overlays: &'a [AlertOverlay],
    ticker: &'a str,
}

impl<'a> ChangeChart<'a> {
    pub fn new(points: &'a [(NaiveDate, f64)], ticker: &'a str) -> Self {
        Self {
            points,
            overlays: &[],
            ticker,
        }
    }

    pub fn overlays(mut self, overlays: &'a [AlertOverlay]) -> Self {
        self.overlays = overlays;
        self
    }
}

fn row_for(value: f64, min: f64, range: f64, chart_height: usize) -> usize {
    let normalized = (value - min) / range;
    chart_height - 1 - ((normalized * (chart_height - 1) as f64) as usize).min(chart_height - 1)
}

impl Widget for ChangeChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(
                " {} Close Change with Highlighted Dates ",
                self.ticker.to_ascii_uppercase()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.points.is_empty() || inner.height < 3 || inner.width < 4 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // last row for axis labels
        let chart_width = inner.width as usize;

        let visible = if self.points.len() > chart_width {
            &self.points[self.points.len() - chart_width..]
        } else {
            self.points
        };

        let min = visible.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max = visible.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let range = if range < f64::EPSILON { 1.0 } else { range };

        let first_visible = visible[0].0;
        for (i, &(date, _)) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            let shaded = self
                .overlays
                .iter()
                .any(|o| date >= o.date && date <= o.span_end);
            if shaded {
                for row in 0..chart_height {
                    buf.set_string(x, inner.y + row as u16, " ", Style::default().bg(Color::DarkGray));
                }
            }
        }

        // Alerts on non-trading days land on the next plotted column.
        for overlay in self.overlays {
            if overlay.date < first_visible {
                continue;
            }
            let col = visible.partition_point(|p| p.0 < overlay.date);
            if col >= visible.len() {
                continue;
            }
            let x = inner.x + col as u16;
            for row in 0..chart_height {
                buf.set_string(
                    x,
                    inner.y + row as u16,
                    "┆",
                    Style::default().fg(Color::Red).bg(Color::DarkGray),
                );
            }
        }

        if min < 0.0 && max > 0.0 {
            let zero_y = inner.y + row_for(0.0, min, range, chart_height) as u16;
            for i in 0..visible.len() {
                let x = inner.x + i as u16;
                if buf[(x, zero_y)].symbol() == " " {
                    buf[(x, zero_y)].set_symbol("·").set_fg(Color::DarkGray);
                }
            }
        }

        for (i, &(_, value)) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            let y = inner.y + row_for(value, min, range, chart_height) as u16;
            buf[(x, y)].set_symbol("●").set_fg(Color::Cyan);
        }

        let label_y = inner.y + inner.height - 1;
        let axis = Style::default().fg(Color::DarkGray);
        buf.set_string(inner.x, inner.y, format!("{:.2}", max), axis);
        buf.set_string(inner.x, label_y.saturating_sub(1), format!("{:.2}", min), axis);
        buf.set_string(inner.x, label_y, first_visible.to_string(), axis);
        if let Some(&(last, _)) = visible.last() {
            let text = last.to_string();
            let x = (inner.x + inner.width).saturating_sub(text.len() as u16);
            buf.set_string(x, label_y, text, axis);
        }
    }
}
