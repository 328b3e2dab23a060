use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vantage_tui::app::{App, AppAction};
use vantage_tui::config::AppConfig;
use vantage_tui::error::{Result, VantageError};
use vantage_tui::event::{Event, EventHandler};
use vantage_tui::service::create_service;
use vantage_tui::wizard::SignupWizard;

#[derive(Parser, Debug)]
#[command(name = "vantage-signup")]
#[command(author, version, about = "Terminal signup client for the Vantage investing platform")]
struct Args {
    /// Path to config file (default: $XDG_CONFIG_HOME/vantage/signup.toml)
    #[arg(long)]
    config: Option<String>,

    /// Simulate the platform without real network traffic
    #[arg(long)]
    demo: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting vantage-signup");
        }
    }

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let result = run_signup(&mut terminal, args.config.as_deref(), args.demo).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Signup error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| VantageError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| VantageError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| VantageError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| VantageError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .map_err(|e| VantageError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run_signup(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config_path: Option<&str>,
    demo: bool,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);

    let mut config = match config_path {
        Some(path) => AppConfig::load_from(path).unwrap_or_default(),
        None => AppConfig::load().unwrap_or_default(),
    };

    // --demo flag overrides config
    if demo {
        config.general.demo = true;
    }

    let service = create_service(config.general.demo, &config.api);
    let dashboard_url = config.api.dashboard_url.clone();
    let wizard = SignupWizard::standard(service)
        .with_timeout(Duration::from_millis(config.api.timeout_ms))
        .on_complete(move |form| {
            info!(email = %form.email, "account registered, opening dashboard");
            if let Err(e) = open::that(&dashboard_url) {
                warn!("Could not open {dashboard_url}: {e}");
            }
        });

    let mut app = App::new(config, wizard);

    loop {
        terminal
            .draw(|frame| vantage_tui::ui::draw(frame, &app))
            .map_err(|e| VantageError::Terminal(e.to_string()))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if let Some(action) = app.handle_key(key) {
                        match action {
                            AppAction::Advance => {
                                app.advance().await;
                            }
                            AppAction::Resend => {
                                app.resend().await;
                            }
                        }
                    }
                }
                Event::Resize => {}
                Event::Tick => {
                    app.tick();
                }
            }
        }

        if app.should_exit {
            break;
        }
    }

    Ok(())
}
