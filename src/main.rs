use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use greenmind_client::DemoClient;
use greenmind_demo::backend::{self, ApiWorker, DemoApi, FixtureApi};
use greenmind_demo::config::{AppConfig, Overrides};
use greenmind_demo::data::export_report;
use greenmind_demo::{events, logging, ui, App, Theme};

#[derive(Parser, Debug)]
#[command(name = "greenmind-demo")]
#[command(about = "Terminal dashboard for the GreenMind bottle factory demo")]
struct Args {
    /// Backend base URL (e.g. http://localhost:3002/api)
    #[arg(long, conflicts_with = "fixtures")]
    api_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface and analysis language: en, ru or uz
    #[arg(short, long)]
    language: Option<String>,

    /// Request timeout (e.g. "30s", "500ms")
    #[arg(long)]
    timeout: Option<String>,

    /// Read canned backend responses from a directory instead of the API
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Load, analyze, write a JSON report to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?.apply(Overrides {
        api_url: args.api_url,
        language: args.language,
        timeout: args.timeout,
    })?;

    // The TUI owns the terminal, so logs go to a file unless exporting.
    if args.export.is_some() {
        logging::init_stderr()?;
    } else {
        logging::init_file(&config.log_file)?;
    }

    let api = build_api(&config, args.fixtures.as_deref())?;
    tracing::info!(source = api.description(), "Starting greenmind-demo");

    let rt = Runtime::new().context("Failed to start async runtime")?;

    if let Some(export_path) = args.export {
        return export_to_file(&rt, api.as_ref(), &config, &export_path);
    }

    run_tui(&rt, api, &config)
}

fn build_api(config: &AppConfig, fixtures: Option<&Path>) -> Result<Arc<dyn DemoApi>> {
    if let Some(dir) = fixtures {
        return Ok(Arc::new(FixtureApi::new(dir)));
    }

    let client = DemoClient::builder()
        .endpoint(config.api_url.as_str())
        .timeout(config.timeout()?)
        .build()
        .context("Failed to build API client")?;
    let api: Box<dyn DemoApi> = client.into();
    Ok(Arc::from(api))
}

/// Load, analyze and write the report without starting the TUI
fn export_to_file(
    rt: &Runtime,
    api: &dyn DemoApi,
    config: &AppConfig,
    export_path: &Path,
) -> Result<()> {
    let dashboard = rt.block_on(async {
        let dashboard = backend::load_dashboard(api).await?;
        match backend::run_analysis(api, config.language()).await {
            Ok(analysis) => Ok::<_, anyhow::Error>(dashboard.with_analysis(analysis)),
            Err(e) => {
                tracing::warn!(error = %e, "Analysis failed, exporting readings only");
                Ok(dashboard)
            }
        }
    })?;

    export_report(&dashboard, export_path)?;
    println!("Exported factory state to: {}", export_path.display());
    Ok(())
}

/// Run the TUI against the given backend
fn run_tui(rt: &Runtime, api: Arc<dyn DemoApi>, config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let worker = ApiWorker::new(api, rt.handle().clone());
    let mut app = App::new(
        worker,
        config.language(),
        Theme::from_choice(config.theme),
    );
    app.start();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Redrawn on the next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        app.poll_backend();
    }

    tracing::info!("Shutting down");
    Ok(())
}
