//! A scroll-wheel date and time picker for the terminal.
//!
//! Drag a column with the mouse, scroll it, or use the arrow keys.  Enter
//! prints the chosen value to stdout, so `when=$(wheel-picker)` works from a
//! shell.

use std::fs::File;
use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wheel_picker::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    rebound_runtime::TokioTickScheduler,
    state::AppState,
};
use wheel_picker::config;
use wheel_picker::core::date_picker::PickerSlot;
use wheel_picker::ui::{picker_view::PickerView, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-wheel date and time picker")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/wheel-picker/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// First selectable year.
    #[arg(long)]
    start_year: Option<i32>,

    /// Last selectable year.
    #[arg(long)]
    end_year: Option<i32>,

    /// Initially selected year.
    #[arg(long)]
    year: Option<i32>,

    /// Initially selected month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Hide the year/month/day columns.
    #[arg(long)]
    no_date: bool,

    /// Hide the hour/minute columns.
    #[arg(long)]
    no_time: bool,

    /// Stop at the ends of each list instead of wrapping around.
    #[arg(long)]
    no_recycle: bool,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut config::AppConfig) {
        let options = &mut config.options;
        if let Some(year) = self.start_year {
            options.start_year = year;
        }
        if let Some(year) = self.end_year {
            options.end_year = year;
        }
        if let Some(year) = self.year {
            options.selected_year = year;
        }
        if let Some(month) = self.month {
            options.selected_month = month;
        }
        if self.no_date {
            options.show_date = false;
        }
        if self.no_time {
            options.show_time = false;
        }
        if self.no_recycle {
            options.style.recycle = false;
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // Never pollute stdout; it carries the result.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn render(frame: &mut Frame, state: &AppState) {
    let bg = state.background;
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Rgb(bg.r, bg.g, bg.b))),
        frame.area(),
    );

    for column in &state.layout.columns {
        let focused = column.slot == state.focus;
        let block = Block::default()
            .title(format!(" {} ", column.slot.label()))
            .title_style(if focused {
                Theme::focused_title_style()
            } else {
                Theme::title_style()
            })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border_style()
            } else {
                Theme::border_style()
            });
        let view = PickerView::new(state.picker.wheel(column.slot), state.cell_height)
            .block(block)
            .background(bg);
        frame.render_widget(view, column.area);
    }

    let status = match (&state.status_message, state.picker.display_string()) {
        (None, Some(value)) => Line::from(vec![
            Span::styled(format!(" {value} "), Theme::value_style()),
            Span::raw(format!(" {}", state.config.status_bar_hint())),
        ]),
        _ => Line::from(state.status_line()),
    };
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        state.layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut user_config = config::AppConfig::load(cli.config.as_deref());
    cli.apply(&mut user_config);
    let mut state = AppState::new(user_config);

    // ── async channels ────────────────────────────────────────
    let (tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
    for slot in PickerSlot::ALL {
        let scheduler = TokioTickScheduler::new(tx.clone(), slot);
        state.picker.wheel_mut(slot).set_scheduler(Box::new(scheduler));
    }
    spawn_event_reader(tx, Duration::from_millis(250));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    info!("picker started");

    // ── event loop ────────────────────────────────────────────
    let mut dirty = true;
    loop {
        if dirty {
            let size = terminal.size()?;
            state.relayout(Rect::new(0, 0, size.width, size.height));
            terminal.draw(|frame| render(frame, &state))?;
            dirty = false;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        dirty |= dispatch(&mut state, event);

        // Batch everything already queued into a single redraw.
        while let Ok(event) = events.try_recv() {
            dirty |= dispatch(&mut state, event);
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if state.confirmed {
        if let Some(value) = state.picker.display_string() {
            debug!(%value, "confirmed");
            println!("{value}");
        }
    }

    Ok(())
}

fn dispatch(state: &mut AppState, event: AppEvent) -> bool {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Rebound(slot) => handler::handle_rebound(state, slot),
        AppEvent::Resize(_, _) => true,
    }
}
