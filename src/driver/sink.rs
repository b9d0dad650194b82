//! Narration and result sinks

use crate::algorithms::{format_grid, Outcome};
use crate::snapshot::Snapshot;
use std::io::{self, Write};

/// Receives the narration of each applied transition and the end of a run
pub trait Sink {
    fn narrate(&mut self, text: &str, snapshot: &Snapshot);

    /// `None` means the run was cancelled
    fn conclude(&mut self, outcome: Option<&Outcome>);
}

/// One narrated step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLine {
    pub position: usize,
    pub text: String,
}

/// Narration lines a [`Journal`] keeps before dropping the oldest
pub const DEFAULT_JOURNAL_LIMIT: usize = 10_000;

/// Recording sink: keeps the latest narration lines and every conclusion
#[derive(Debug, Clone)]
pub struct Journal {
    pub lines: Vec<JournalLine>,
    pub conclusions: Vec<Option<Outcome>>,
    limit: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Journal::with_limit(DEFAULT_JOURNAL_LIMIT)
    }
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal keeping at most `limit` lines (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Journal {
            lines: Vec::new(),
            conclusions: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Narration text in order, one entry per line of text
    pub fn output(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| line.text.lines().map(str::to_string))
            .collect()
    }

    /// Positions narrated so far, in order
    pub fn positions(&self) -> Vec<usize> {
        self.lines.iter().map(|line| line.position).collect()
    }

    pub fn last_conclusion(&self) -> Option<&Option<Outcome>> {
        self.conclusions.last()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.conclusions.clear();
    }
}

impl Sink for Journal {
    fn narrate(&mut self, text: &str, snapshot: &Snapshot) {
        // Positions are increasing; a replay after a step back rewrites the tail
        let keep = self
            .lines
            .partition_point(|line| line.position < snapshot.position);
        self.lines.truncate(keep);

        if self.lines.len() >= self.limit {
            // Trim in chunks of a tenth of the limit
            let excess = self.lines.len() + 1 - self.limit;
            let drop = excess.max(self.limit / 10).min(self.lines.len());
            self.lines.drain(..drop);
        }

        self.lines.push(JournalLine {
            position: snapshot.position,
            text: text.to_string(),
        });
    }

    fn conclude(&mut self, outcome: Option<&Outcome>) {
        self.conclusions.push(outcome.cloned());
    }
}

/// Writes narration to an output stream, for headless runs
pub struct Printer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Printer { out, error: None }
    }

    /// First write error, if any occurred
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.out, "{}", line) {
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> Sink for Printer<W> {
    fn narrate(&mut self, text: &str, snapshot: &Snapshot) {
        self.write_line(format_args!("{:>4}  {}", snapshot.position, text));
    }

    fn conclude(&mut self, outcome: Option<&Outcome>) {
        match outcome {
            Some(outcome) => {
                self.write_line(format_args!("Result: {}", outcome));
                if let Outcome::Sudoku(Some(grid)) = outcome {
                    for row in format_grid(grid).lines() {
                        self.write_line(format_args!("        {}", row));
                    }
                }
            }
            None => self.write_line(format_args!("Cancelled")),
        }
    }
}
