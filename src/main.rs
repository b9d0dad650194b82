// algotrace: step-by-step animated algorithm visualizer

use std::fs::File;
use std::io;
use std::panic;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use algotrace::cli::Options;
use algotrace::driver::{Driver, DriverError, Printer};
use algotrace::ui::App;

/// Route logs to `--log` when given. Headless runs fall back to stderr; the
/// TUI owns the terminal, so without a file it logs nothing.
fn init_logging(options: &Options) -> io::Result<()> {
    let target = match &options.log_file {
        Some(path) => env_logger::Target::Pipe(Box::new(File::create(path)?)),
        None if options.headless => env_logger::Target::Stderr,
        None => return Ok(()),
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(options.log_level());
    builder.parse_default_env();
    builder.target(target);

    builder.init();
    Ok(())
}

fn run_headless(driver: &mut Driver) -> io::Result<()> {
    let mut printer = Printer::new(io::stdout().lock());
    loop {
        match driver.step(&mut printer) {
            Ok(()) => {}
            Err(DriverError::Exhausted) => break,
            Err(e) => {
                log::warn!("headless run stopped: {}", e);
                break;
            }
        }
    }
    printer.finish()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse();
    init_logging(&options)?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let problem = match options.command.problem(&mut rng) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let settings = options.settings();
    let mut driver = Driver::new(problem, &settings);

    if options.headless {
        println!("{}", driver.problem().title());
        run_headless(&mut driver)?;
        return Ok(());
    }

    // Leave raw mode before a panic message is printed
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        previous_hook(info);
    }));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(driver, options.command.clone(), rng);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
