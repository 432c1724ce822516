use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};

use alert_lens::config::Config;
use alert_lens::event::AppEvent;
use alert_lens::input::parse_main_command;
use alert_lens::loader::{DatasetReader, FsDatasetReader};
use alert_lens::ui::{self, AppState, CommandOutcome};

fn load_selection<R: DatasetReader>(reader: &R, state: &mut AppState) {
    let key = state.key();
    match reader.load(&key) {
        Ok(dataset) => state.apply(AppEvent::DatasetLoaded(dataset)),
        Err(e) => {
            tracing::warn!(dataset = %key, error = %e, "Failed to load dataset");
            state.apply(AppEvent::LoadFailed {
                key,
                error: e.to_string(),
            });
        }
    }
}

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Set ALERT_LENS_CONFIG or create config/default.toml");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create("alert-lens.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        data_dir = %config.data.dir.display(),
        tickers = ?config.data.ticker_list(),
        "Starting alert-lens"
    );

    let reader = FsDatasetReader::new(&config.data.dir);
    let mut app_state = AppState::new(
        &config.data,
        config.estimator.clone(),
        config.chart.clone(),
    );
    app_state.push_log(format!("alert-lens started | {}", config.data.dir.display()));
    load_selection(&reader, &mut app_state);

    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &app_state))?;

            if !crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
                continue;
            }
            let Event::Key(key) = crossterm::event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(cmd) = parse_main_command(&key.code) else {
                continue;
            };
            match app_state.handle_command(cmd) {
                CommandOutcome::Quit => {
                    tracing::info!("User quit");
                    return Ok(());
                }
                CommandOutcome::Reload => load_selection(&reader, &mut app_state),
                CommandOutcome::Redraw => {}
            }
        }
    })();
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %e, "Terminal loop failed");
    }
    tracing::info!("Shutdown complete");
    result
}
