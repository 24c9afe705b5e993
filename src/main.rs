mod app;
mod config;
mod draft;
mod series;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use series::{access::Viewer, Series, SeriesList};

#[derive(Parser, Debug)]
#[command(name = "seriesboard")]
#[command(version)]
#[command(about = "A terminal viewer for draft series")]
struct Args {
    /// Print the series rows and exit
    #[arg(short, long)]
    list: bool,

    /// Print the series as JSON and exit
    #[arg(short, long)]
    json: bool,

    /// Generate and print a draft order for the given series id
    #[arg(short, long, value_name = "SERIES_ID")]
    draft: Option<u64>,

    /// Number of events to draft (defaults to the config value)
    #[arg(short, long, requires = "draft")]
    events: Option<usize>,

    /// Seed for a reproducible draft
    #[arg(long, requires = "draft")]
    seed: Option<u64>,

    /// View as this username
    #[arg(long)]
    viewer: Option<String>,

    /// User id of the viewer, for participant matching
    #[arg(long)]
    user_id: Option<u64>,

    /// View as staff (sees every series)
    #[arg(long)]
    staff: bool,
}

impl Args {
    /// Command-line identity wins over the configured one. None when neither
    /// names a viewer, in which case output is not filtered.
    fn viewer(&self, config: &AppConfig) -> Option<Viewer> {
        if self.staff || self.viewer.is_some() || self.user_id.is_some() {
            Some(Viewer::from_parts(self.staff, self.viewer.as_deref(), self.user_id))
        } else if config.has_viewer() {
            Some(config.viewer())
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging (stderr, so it stays out of --json/--list output)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    // Handle CLI-only commands
    if let Some(series_id) = args.draft {
        return print_draft(&config, series_id, args.events, args.seed);
    }

    if args.list || args.json {
        return print_series(&args, &config);
    }

    run_tui(config)
}

fn mounted_list() -> SeriesList {
    let mut list = SeriesList::new();
    list.mount();
    list
}

/// Series to print: everything, or what the viewer is allowed to see
fn visible_series<'a>(list: &'a SeriesList, viewer: Option<&Viewer>) -> Vec<&'a Series> {
    match viewer {
        Some(viewer) => {
            let visible = viewer.visible_series(list.items());
            tracing::debug!(
                "{} of {} series visible to {}",
                visible.len(),
                list.items().len(),
                viewer.label()
            );
            visible
        }
        None => list.items().iter().collect(),
    }
}

fn print_series(args: &Args, config: &AppConfig) -> Result<()> {
    let list = mounted_list();
    let viewer = args.viewer(config);
    let visible = visible_series(&list, viewer.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        for row in ui::series_rows(visible) {
            println!("{}", row);
        }
    }
    Ok(())
}

fn print_draft(config: &AppConfig, series_id: u64, events: Option<usize>, seed: Option<u64>) -> Result<()> {
    let list = mounted_list();
    let series = list
        .find(series_id)
        .ok_or_else(|| anyhow::anyhow!("No series with id {}", series_id))?;

    let event_count = events.unwrap_or(config.draft.event_count);
    let mut rng = match seed.or(config.draft.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let draft = draft::SeriesDraft::new(series, draft::claim::numbered_events(event_count), &mut rng)?;

    let output = serde_json::json!({
        "message": draft.order.summary(),
        "series": series.id,
        "rounds": draft.order.rounds,
        "remainder": draft.order.remainder,
        "round": draft.progress.round,
        "pick": draft.progress.pick,
        "complete": draft.progress.complete,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.mount();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                tracing::warn!("Key handling failed: {}", e);
                                app.set_error(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}
