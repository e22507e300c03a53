use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
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
};

use teclea::{
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{key_descriptor, CrosstermEventSource, FixedTicker, InputEvent, Runner},
    session::{Session, SessionConfig},
};

/// minimal typing practice tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a randomly drawn word prompt and watch live speed and accuracy. Escape restarts with a fresh prompt, ctrl+c quits."
)]
struct Cli {
    /// number of words per exercise (persisted as the new default)
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let number_of_words = resolve_word_count(&cli, &store)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(SessionConfig { number_of_words });
    let run_result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// CLI word count wins and becomes the saved preference; otherwise the
/// stored config (or its default of 20) applies.
fn resolve_word_count(cli: &Cli, store: &FileConfigStore) -> Result<usize, Box<dyn Error>> {
    let mut config = store.load();
    if let Some(n) = cli.number_of_words {
        config = Config {
            number_of_words: n.max(1),
        };
        store.save(&config)?;
    }
    Ok(config.number_of_words)
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::default(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*session, f.area()))?;

    loop {
        match runner.step() {
            InputEvent::Tick => {
                session.on_tick();
                // Redraw only while the clock is visibly running
                if session.is_sampling() {
                    terminal.draw(|f| f.render_widget(&*session, f.area()))?;
                }
            }
            InputEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*session, f.area()))?;
            }
            InputEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }
                if let Some(descriptor) = key_descriptor(key.code) {
                    session.on_key_event(&descriptor);
                }
                terminal.draw(|f| f.render_widget(&*session, f.area()))?;
            }
        }
    }

    Ok(())
}
