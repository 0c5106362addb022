use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use ninemax::{
    app::{App, Flow},
    kv::{KvStore, MemoryKv, SqliteKv},
    runtime::{AppEvent, CrosstermEventSource, Runner},
    store::SessionStore,
};

const TICK_RATE_MS: u64 = 250;

/// live poker table HUD for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Track VPIP, PFR and check-raises for all nine seats of a live poker table, \
                  get a running TAG/LAG/TP/LP read per seat, and keep the session across restarts."
)]
struct Cli {
    /// path to the session database (defaults to the local state dir)
    #[clap(long)]
    db: Option<PathBuf>,

    /// keep the session in memory only; nothing is written to disk
    #[clap(long)]
    ephemeral: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let kv: Box<dyn KvStore> = if cli.ephemeral {
        Box::new(MemoryKv::new())
    } else if let Some(path) = &cli.db {
        Box::new(SqliteKv::open(path)?)
    } else {
        Box::new(SqliteKv::open_default()?)
    };
    let mut app = App::new(SessionStore::new(kv));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if let Flow::Quit = app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_default_values() {
        let cli = Cli::parse_from(["ninemax"]);

        assert_eq!(cli.db, None);
        assert!(!cli.ephemeral);
    }

    #[test]
    fn cli_db_path() {
        let cli = Cli::parse_from(["ninemax", "--db", "/tmp/t.db"]);

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));
    }

    #[test]
    fn cli_ephemeral_flag() {
        let cli = Cli::parse_from(["ninemax", "--ephemeral"]);

        assert!(cli.ephemeral);
    }

    #[test]
    fn tick_rate_is_sub_second() {
        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 1000);
    }
}
