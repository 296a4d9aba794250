mod app;
mod ui;

use crate::app::{App, AppOptions, View};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    rc::Rc,
    time::Duration,
};
use tracing::{info, warn};
use typetrial::{
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    passage::PassageSet,
    roster::{RosterSource, StaticRoster, UnavailableRoster},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::SessionConfig,
};

/// seven-round typing competition in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing competition TUI: a practice passage, seven timed rounds with per-round accuracy and WPM, waiting rooms, host monitoring and leaderboards."
)]
pub struct Cli {
    /// view to open first
    #[clap(short = 'v', long, value_enum, default_value_t = View::Briefing)]
    view: View,

    /// seconds per competition round (overrides the config file)
    #[clap(short = 's', long)]
    round_secs: Option<u32>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// file to append logs to
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file values with command line overrides applied
    fn resolve_config(&self, mut config: Config) -> Config {
        config.round_secs = self.round_secs.unwrap_or(config.round_secs).max(1);
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let config = cli.resolve_config(store.load());

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init(&log_path, &config.log_filter)?;
    }
    info!(view = %cli.view, round_secs = config.round_secs, "starting");

    let roster: Box<dyn RosterSource> = match StaticRoster::bundled() {
        Ok(roster) => Box::new(roster),
        Err(e) => {
            warn!(error = %e, "bundled roster unreadable");
            Box::new(UnavailableRoster)
        }
    };
    let options = AppOptions {
        passages: PassageSet::bundled()?,
        session: SessionConfig::from(&config),
        monitor_step: Duration::from_millis(config.monitor_step_ms),
    };
    let clock: Rc<dyn Clock> = Rc::new(SystemClock::new());
    let mut app = App::new(options, roster, clock, StdRng::from_entropy(), cli.view);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, config.tick_rate_ms);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate_ms: u64,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(tick_rate_ms.max(10))),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.on_key(key),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
