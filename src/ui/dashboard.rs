use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::event_window::{EventWindowReport, ReturnEstimate};
use crate::network::{InteractionGraph, NodeRole};

pub struct StatusBar<'a> {
    pub ticker: &'a str,
    pub i: u32,
    pub network_days: u32,
    pub loaded: bool,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let load_status = if self.loaded {
            Span::styled("LOADED", Style::default().fg(Color::Green))
        } else {
            Span::styled("NO DATA", Style::default().fg(Color::Red))
        };

        let line = Line::from(vec![
            Span::styled(
                " alert-lens ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.ticker.to_ascii_uppercase(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("I={}", self.i), Style::default().fg(Color::White)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("network_days={}", self.network_days),
                Style::default().fg(Color::White),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            load_status,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct SummaryPanel<'a> {
    report: Option<&'a EventWindowReport>,
    invalid_alerts: &'a [String],
    error: Option<&'a str>,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(
        report: Option<&'a EventWindowReport>,
        invalid_alerts: &'a [String],
        error: Option<&'a str>,
    ) -> Self {
        Self {
            report,
            invalid_alerts,
            error,
        }
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let mut lines = Vec::new();

        if let Some(err) = self.error {
            lines.push(Line::from(Span::styled(
                "Load failed:",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(err.to_string(), value)));
        } else if let Some(report) = self.report {
            let cfg = &report.config;
            lines.push(Line::from(vec![
                Span::styled("Window: ", label),
                Span::styled(
                    format!(
                        "{}d +{} {} {}",
                        cfg.window_len,
                        cfg.offset,
                        cfg.return_kind.label(),
                        cfg.calendar.label()
                    ),
                    value,
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Covered:", label),
                Span::styled(
                    format!(" {} / skipped {}", report.covered(), report.skipped),
                    value,
                ),
            ]));
            match &report.estimate {
                ReturnEstimate::NoValidData => {
                    lines.push(Line::from(Span::styled(
                        "no valid data points",
                        Style::default().fg(Color::Yellow),
                    )));
                }
                ReturnEstimate::Estimate(stats) => {
                    let color = if stats.mean > 0.0 {
                        Color::Green
                    } else if stats.mean < 0.0 {
                        Color::Red
                    } else {
                        Color::White
                    };
                    lines.push(Line::from(vec![
                        Span::styled("Mean:   ", label),
                        Span::styled(format!("{:.6}", stats.mean), Style::default().fg(color)),
                    ]));
                    lines.push(Line::from(vec![
                        Span::styled("Var:    ", label),
                        Span::styled(format!("{:.6}", stats.variance), value),
                    ]));
                }
            }
            if report.invalid > 0 {
                lines.push(Line::from(Span::styled(
                    format!("Invalid alerts: {}", report.invalid),
                    Style::default().fg(Color::Yellow),
                )));
                for raw in self.invalid_alerts.iter().take(3) {
                    lines.push(Line::from(Span::styled(format!("  {}", raw), label)));
                }
            }
        } else {
            lines.push(Line::from(Span::styled("---", label)));
        }

        let block = Block::default()
            .title(" Post-Alert Return ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Author -> counterpart adjacency for the selected day.
pub struct NetworkPanel<'a> {
    graph: Option<&'a InteractionGraph>,
    day: Option<NaiveDate>,
}

impl<'a> NetworkPanel<'a> {
    pub fn new(graph: Option<&'a InteractionGraph>, day: Option<NaiveDate>) -> Self {
        Self { graph, day }
    }
}

impl Widget for NetworkPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.day {
            Some(day) => format!(" Title-Body Network for {} ", day),
            None => " Title-Body Network ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let lines: Vec<Line> = match self.graph {
            None => vec![Line::from(Span::styled(
                "no interaction days",
                Style::default().fg(Color::DarkGray),
            ))],
            Some(graph) if graph.is_empty() => vec![Line::from(Span::styled(
                "no interactions on this day",
                Style::default().fg(Color::DarkGray),
            ))],
            Some(graph) => {
                let mut out = vec![Line::from(Span::styled(
                    format!(
                        "{} nodes, {} edges",
                        graph.node_count(),
                        graph.edge_count()
                    ),
                    Style::default().fg(Color::DarkGray),
                ))];
                for author in graph.keys_with_role(NodeRole::Author) {
                    out.push(Line::from(vec![
                        Span::styled(author.clone(), Style::default().fg(Color::LightBlue)),
                        Span::styled(" -> ", Style::default().fg(Color::DarkGray)),
                        Span::styled(
                            graph.neighbors(&author).join(", "),
                            Style::default().fg(Color::LightGreen),
                        ),
                    ]));
                }
                out
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|m| {
                let color = if m.starts_with("[ERR]") {
                    Color::Red
                } else if m.starts_with("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(m.as_str(), Style::default().fg(color)))
            })
            .collect();

        let block = Block::default()
            .title(" System Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(" [Q]", key),
            Span::styled("uit  ", text),
            Span::styled("[t/T]", key),
            Span::styled(" ticker  ", text),
            Span::styled("[i/I]", key),
            Span::styled(" I  ", text),
            Span::styled("[n/N]", key),
            Span::styled(" network_days  ", text),
            Span::styled("[w/W]", key),
            Span::styled(" window  ", text),
            Span::styled("[K]", key),
            Span::styled(" return  ", text),
            Span::styled("[C]", key),
            Span::styled(" calendar  ", text),
            Span::styled("[G]", key),
            Span::styled(" network  ", text),
            Span::styled("[←/→]", key),
            Span::styled(" day", text),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
