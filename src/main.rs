use hangman::cli::{Cli, parse_cli, run_plain};
use hangman::logging::{self, LogTarget};
use hangman::tui::TuiInterface;
use hangman::{App, DirectoryWordSource, EmbeddedWordSource, SystemClock, WordSource};
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn word_source(cli: &Cli) -> Box<dyn WordSource> {
    if cli.builtin_words {
        return Box::new(EmbeddedWordSource);
    }
    let dir = cli.words_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    Box::new(DirectoryWordSource::with_default_fallback(dir))
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut app = App::new(word_source(cli), cli.language, SystemClock::new());
    if let Some(mode) = cli.mode
        && let Err(e) = app.start_mode(mode)
    {
        // The app stays on the menu with a notice.
        eprintln!("{e}: {}", e.source);
    }

    if cli.plain {
        let stdin = io::stdin();
        run_plain(&mut app, stdin.lock(), io::stdout().lock())?;
        return Ok(());
    }

    let mut tui = TuiInterface::new()?;
    let result = tui.run(&mut app);
    tui.cleanup()?;
    result
}

fn main() -> ExitCode {
    let cli = parse_cli();

    let target = if cli.plain {
        LogTarget::Stderr
    } else {
        logging::default_log_file().map_or(LogTarget::Stderr, LogTarget::File)
    };
    if let Err(e) = logging::init(cli.verbose, &target) {
        eprintln!("Failed to initialise logging: {e}");
    }
    info!("Starting hangman ({})", cli.language);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal I/O error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
