pub mod chart;
pub mod dashboard;

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::analysis::{analyze, AnalysisRequest, AnalysisView};
use crate::config::{ChartConfig, DataConfig};
use crate::event::AppEvent;
use crate::event_window::EventWindowConfig;
use crate::input::UiCommand;
use crate::loader::{Dataset, DatasetKey};
use crate::network::interaction_days;

use chart::ChangeChart;
use dashboard::{KeybindBar, LogPanel, NetworkPanel, StatusBar, SummaryPanel};

const MAX_LOG_MESSAGES: usize = 200;

/// What the caller has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The dataset key changed; load it and feed the result to `apply`.
    Reload,
    /// Only the view changed and has already been recomputed.
    Redraw,
    Quit,
}

pub struct AppState {
    pub tickers: Vec<String>,
    pub ticker_index: usize,
    pub i: u32,
    pub i_step: u32,
    pub network_days: u32,
    pub network_days_step: u32,
    pub window: EventWindowConfig,
    pub chart: ChartConfig,
    pub show_network: bool,
    pub day_index: usize,
    pub dataset: Option<Dataset>,
    pub available_days: Vec<NaiveDate>,
    pub view: Option<AnalysisView>,
    pub load_error: Option<String>,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(data: &DataConfig, window: EventWindowConfig, chart: ChartConfig) -> Self {
        Self {
            tickers: data.ticker_list(),
            ticker_index: 0,
            i: data.default_i,
            i_step: data.i_step.max(1),
            network_days: data.default_network_days,
            network_days_step: data.network_days_step.max(1),
            window,
            chart,
            show_network: false,
            day_index: 0,
            dataset: None,
            available_days: Vec::new(),
            view: None,
            load_error: None,
            log_messages: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        self.tickers
            .get(self.ticker_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(self.ticker(), self.i, self.network_days)
    }

    pub fn selected_day(&self) -> Option<NaiveDate> {
        if !self.show_network {
            return None;
        }
        self.available_days.get(self.day_index).copied()
    }

    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.key(), self.window.clone(), self.chart.clone())
            .with_network_day(self.selected_day())
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    fn refresh_view(&mut self) {
        let request = self.request();
        self.view = self.dataset.as_ref().map(|ds| analyze(ds, &request));
    }

    pub fn handle_command(&mut self, cmd: UiCommand) -> CommandOutcome {
        match cmd {
            UiCommand::Quit => return CommandOutcome::Quit,
            UiCommand::NextTicker | UiCommand::PrevTicker => {
                let n = self.tickers.len().max(1);
                self.ticker_index = if cmd == UiCommand::NextTicker {
                    (self.ticker_index + 1) % n
                } else {
                    (self.ticker_index + n - 1) % n
                };
                return CommandOutcome::Reload;
            }
            UiCommand::RaiseI => {
                self.i = self.i.saturating_add(self.i_step);
                return CommandOutcome::Reload;
            }
            UiCommand::LowerI => {
                self.i = self.i.saturating_sub(self.i_step);
                return CommandOutcome::Reload;
            }
            UiCommand::RaiseNetworkDays => {
                self.network_days = self.network_days.saturating_add(self.network_days_step);
                return CommandOutcome::Reload;
            }
            UiCommand::LowerNetworkDays => {
                self.network_days = self.network_days.saturating_sub(self.network_days_step);
                return CommandOutcome::Reload;
            }
            UiCommand::WidenWindow => {
                self.window.window_len = self.window.window_len.saturating_add(1);
            }
            UiCommand::NarrowWindow => {
                self.window.window_len = self.window.window_len.saturating_sub(1).max(1);
            }
            UiCommand::ToggleReturnKind => {
                self.window.return_kind = self.window.return_kind.toggled();
            }
            UiCommand::ToggleCalendar => {
                self.window.calendar = self.window.calendar.toggled();
            }
            UiCommand::ToggleNetwork => {
                self.show_network = !self.show_network;
            }
            UiCommand::NextDay => {
                if self.day_index + 1 < self.available_days.len() {
                    self.day_index += 1;
                }
            }
            UiCommand::PrevDay => {
                self.day_index = self.day_index.saturating_sub(1);
            }
        }
        self.refresh_view();
        CommandOutcome::Redraw
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::DatasetLoaded(dataset) => {
                if !dataset.row_errors.is_empty() {
                    self.push_log(format!(
                        "[WARN] {} malformed rows skipped in {}",
                        dataset.row_errors.len(),
                        dataset.key
                    ));
                }
                self.push_log(format!(
                    "Loaded {} ({} prices, {} alerts)",
                    dataset.key,
                    dataset.prices.len(),
                    dataset.alerts.len()
                ));
                self.available_days = interaction_days(&dataset.interactions);
                self.day_index = self
                    .day_index
                    .min(self.available_days.len().saturating_sub(1));
                self.dataset = Some(dataset);
                self.load_error = None;
                self.refresh_view();
            }
            AppEvent::LoadFailed { key, error } => {
                self.push_log(format!("[ERR] {}: {}", key, error));
                self.dataset = None;
                self.available_days.clear();
                self.view = None;
                self.load_error = Some(error);
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let mut constraints = vec![
        Constraint::Length(1), // status bar
        Constraint::Min(10),   // chart + summary
    ];
    if state.show_network {
        constraints.push(Constraint::Length(12)); // network
    }
    constraints.push(Constraint::Length(5)); // system log
    constraints.push(Constraint::Length(1)); // keybinds
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            ticker: state.ticker(),
            i: state.i,
            network_days: state.network_days,
            loaded: state.dataset.is_some(),
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(outer[1]);

    let (points, overlays, report, invalid) = match &state.view {
        Some(view) => (
            view.chart_points.as_slice(),
            view.overlays.as_slice(),
            Some(&view.report),
            view.invalid_alerts.as_slice(),
        ),
        None => (&[][..], &[][..], None, &[][..]),
    };
    frame.render_widget(
        ChangeChart::new(points, state.ticker()).overlays(overlays),
        main_area[0],
    );
    frame.render_widget(
        SummaryPanel::new(report, invalid, state.load_error.as_deref()),
        main_area[1],
    );

    let mut next = 2;
    if state.show_network {
        let graph = state.view.as_ref().and_then(|v| v.graph.as_ref());
        frame.render_widget(NetworkPanel::new(graph, state.selected_day()), outer[next]);
        next += 1;
    }

    frame.render_widget(LogPanel::new(&state.log_messages), outer[next]);
    frame.render_widget(KeybindBar, outer[next + 1]);
}
