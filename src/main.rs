use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use shelfwatch::{
    app::App,
    config::PageConfig,
    display::{apply_document, ElementRegistry},
    events,
    poll::Poller,
    source::{FileSource, HttpSource, StatusSource},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "shelfwatch")]
#[command(about = "Terminal viewer that polls a DAQ shelf monitor status endpoint")]
struct Args {
    /// URL of the shelf monitor JSON endpoint
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Path to a saved status document (offline mode)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Page definition file declaring the display elements
    #[arg(short, long, default_value = "page.toml")]
    page: PathBuf,

    /// Polling interval in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Run one polling cycle, print the page state as JSON, and exit
    #[arg(long)]
    once: bool,

    /// Append log output to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let page = PageConfig::load(&args.page)?;
    let registry = page.build_registry();
    if registry.is_empty() {
        bail!(
            "page definition {} declares no elements",
            args.page.display()
        );
    }

    let interval = resolve_interval(args.interval_ms, page.interval_ms)?;
    let source = build_source(&args, &page)?;

    // The TUI runs on the main thread; the poller runs on the runtime.
    let rt = tokio::runtime::Runtime::new()?;

    if args.once {
        return run_once(&rt, source, registry);
    }

    let description = source.description().to_string();
    let (handle, updates) = rt.block_on(async { Poller::spawn(source, interval) });

    let app = App::new(registry, updates, description);
    let result = run_tui(app);

    handle.stop();
    result
}

/// Resolve the polling interval from the CLI and page defaults.
///
/// A zero interval is rejected here: the ticker cannot run with a zero
/// period, and a poller that dies in its own task would leave the TUI
/// waiting forever with nothing on screen.
fn resolve_interval(cli_ms: Option<u64>, page_ms: Option<u64>) -> Result<Duration> {
    let ms = cli_ms.or(page_ms).unwrap_or(1000);
    if ms == 0 {
        bail!("polling interval must be at least 1 ms");
    }
    Ok(Duration::from_millis(ms))
}

/// Pick the status source from the CLI and page defaults.
fn build_source(args: &Args, page: &PageConfig) -> Result<Box<dyn StatusSource>> {
    if let Some(ref url) = args.url {
        return Ok(Box::new(HttpSource::new(url)?));
    }
    if let Some(ref path) = args.file {
        return Ok(Box::new(FileSource::new(path)));
    }
    if let Some(ref url) = page.url {
        return Ok(Box::new(HttpSource::new(url)?));
    }
    bail!("no endpoint: pass --url or --file, or set url in the page definition");
}

/// Set up file-based logging (the terminal belongs to the TUI).
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run a single fetch-and-apply cycle and print the page state as JSON.
fn run_once(
    rt: &tokio::runtime::Runtime,
    source: Box<dyn StatusSource>,
    mut registry: ElementRegistry,
) -> Result<()> {
    let document = rt.block_on(source.fetch())?;
    let report = apply_document(&mut registry, &document);

    if !report.is_clean() {
        for failure in &report.failures {
            eprintln!(
                "warning: {}/{}: {}",
                failure.group, failure.item, failure.reason
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&registry.to_json())?);
    Ok(())
}

/// Run the TUI over the given app state.
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 8;

    while app.running {
        // Apply any completed polling cycles before drawing
        app.drain_updates();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, area);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(5),    // Element table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::render_header(frame, app, chunks[0]);
            ui::render_elements(frame, app, chunks[1]);
            ui::render_status_bar(frame, app, chunks[2]);

            if app.show_help {
                ui::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
