//! Main TUI application state and logic

use crate::cli::Command;
use crate::driver::{Driver, DriverError, Journal, Speed};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Narration,
    Stats,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: structure -> narration -> stats)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Stats,
            FocusedPane::Stats => FocusedPane::Structure,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Stats,
            FocusedPane::Narration => FocusedPane::Structure,
            FocusedPane::Stats => FocusedPane::Narration,
        }
    }
}

/// The main application state
pub struct App {
    /// Drives the problem being visualized
    pub driver: Driver,

    /// Subcommand the problem came from, reused to generate fresh inputs
    pub command: Command,

    pub rng: StdRng,

    /// Narration received from the driver
    pub journal: Journal,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub structure_scroll: usize,
    pub narration_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a refused request
    pub status_is_error: bool,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(driver: Driver, command: Command, rng: StdRng) -> Self {
        App {
            driver,
            command,
            rng,
            journal: Journal::new(),
            focused_pane: FocusedPane::Structure,
            structure_scroll: 0,
            narration_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Auto-play: the driver decides whether a deadline has passed
            let was_running = self.driver.control().is_running;
            if self.driver.tick(Instant::now(), &mut self.journal) {
                self.narration_scroll = usize::MAX;
                if was_running && self.driver.control().is_finished {
                    self.set_status("Run complete");
                }
            }

            // Use poll with timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(pane_area);

        // Left column: Structure (top) | Narration (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let snapshot = self.driver.snapshot();
        let control = self.driver.control();

        super::panes::render_structure_pane(
            frame,
            left_rows[0],
            self.driver.problem(),
            snapshot,
            self.focused_pane == FocusedPane::Structure,
            &mut self.structure_scroll,
        );

        super::panes::render_narration_pane(
            frame,
            left_rows[1],
            &self.journal,
            snapshot.position,
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        super::panes::render_stats_pane(
            frame,
            columns[1],
            self.driver.problem(),
            snapshot,
            &control,
            self.driver.history(),
            self.focused_pane == FocusedPane::Stats,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            snapshot.position,
            self.driver.frontier(),
            &control,
            self.status_is_error,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(speed) = c.to_digit(10).and_then(Speed::from_digit) {
                    self.driver.set_speed(speed);
                    self.set_status(format!("Speed: {}", speed));
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.driver.pause();
                match self.driver.step_back() {
                    Ok(()) => self.set_status("Stepped backward"),
                    Err(e) => self.set_error(e),
                }
            }
            KeyCode::Right => {
                self.driver.pause();
                match self.driver.step(&mut self.journal) {
                    Ok(()) => {
                        self.set_status("Stepped forward");
                        self.narration_scroll = usize::MAX;
                    }
                    Err(e) => self.set_error(e),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.driver.pause();
                match self.driver.next_result(&mut self.journal) {
                    Ok(()) => {
                        self.set_status("Jumped to the next result");
                        self.narration_scroll = usize::MAX;
                    }
                    Err(e) => self.set_error(e),
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.driver.reset(&mut self.journal);
                self.journal.clear();
                self.narration_scroll = 0;
                self.set_status("Reset");
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                match self.command.regenerate(&mut self.rng) {
                    Ok(problem) => {
                        self.driver.set_problem(problem, &mut self.journal);
                        self.journal.clear();
                        self.structure_scroll = 0;
                        self.narration_scroll = 0;
                        self.set_status("New input generated");
                    }
                    Err(e) => {
                        self.status_message = format!("Cannot generate input: {}", e);
                        self.status_is_error = true;
                    }
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_sub(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_sub(1);
                }
                FocusedPane::Stats => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_add(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_add(1);
                }
                FocusedPane::Stats => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    let before = self.driver.control();
                    if !before.is_running {
                        self.journal.clear();
                    }
                    self.driver.toggle(Instant::now());
                    let after = self.driver.control();
                    if after.is_playing() {
                        self.set_status("Playing...");
                    } else if after.is_running {
                        self.set_status("Paused");
                    }
                }
            }
            _ => {}
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, error: DriverError) {
        self.status_message = match error {
            DriverError::Busy => "Pause the run first".to_string(),
            DriverError::AtStart => "Already at the first retained step".to_string(),
            DriverError::Exhausted => "Run finished; press r to reset".to_string(),
        };
        self.status_is_error = true;
    }
}
