//! Animation driver
//!
//! [`Driver`] owns one problem, the snapshot being shown, the step history
//! and the run control flags. It never sleeps: the UI loop calls
//! [`Driver::tick`] with the current time, and the driver applies a
//! transition only when the suspension deadline armed by the previous one has
//! passed. Because time is a parameter, tests drive it with synthetic
//! instants.
//!
//! # Suspension and cancellation
//!
//! After applying a transition the driver fetches the next one right away and
//! holds it until the deadline. That held transition is the one "in flight":
//! [`Driver::reset`] drops it together with the iterator, so a cancelled run
//! never shows another state. Cancellation is therefore observed at the next
//! suspension point, which is the only place a run can be between
//! transitions.
//!
//! # History
//!
//! Every applied snapshot is kept in a memory-bounded [`History`]. Stepping
//! back restores older snapshots; stepping forward again replays them before
//! the iterator is consulted, so a replayed trace is identical to the
//! original.

pub mod sink;

use crate::algorithms::{Limits, Problem, Transition, TransitionKind};
use crate::config::Settings;
use crate::snapshot::{History, Snapshot};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

pub use sink::{Journal, JournalLine, Printer, Sink, DEFAULT_JOURNAL_LIMIT};

/// Result type for driver controls
pub type Result<T> = std::result::Result<T, DriverError>;

/// Reasons a control request was refused. None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("a run is playing; pause it first")]
    Busy,
    #[error("already at the oldest retained step")]
    AtStart,
    #[error("the run has finished")]
    Exhausted,
}

/// Playback speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Instant,
}

impl Speed {
    /// Base delay between two transitions
    pub fn delay(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(1000),
            Speed::Normal => Duration::from_millis(500),
            Speed::Fast => Duration::from_millis(200),
            Speed::Instant => Duration::from_millis(50),
        }
    }

    /// Preset for the number keys `1`..=`4`
    pub fn from_digit(digit: u32) -> Option<Speed> {
        match digit {
            1 => Some(Speed::Slow),
            2 => Some(Speed::Normal),
            3 => Some(Speed::Fast),
            4 => Some(Speed::Instant),
            _ => None,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
            Speed::Instant => "instant",
        };
        f.write_str(name)
    }
}

/// Run control flags, as shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunControl {
    /// A run exists and has not finished
    pub is_running: bool,
    /// The run is held; only manual steps advance it
    pub is_paused: bool,
    /// The last run reached its outcome
    pub is_finished: bool,
    pub speed: Speed,
}

impl RunControl {
    /// Auto-play is advancing the run
    pub fn is_playing(&self) -> bool {
        self.is_running && !self.is_paused
    }
}

/// Steps one problem's transitions onto a snapshot
pub struct Driver {
    problem: Problem,
    limits: Limits,
    initial_speed: Speed,
    control: RunControl,
    transitions: Option<Box<dyn Iterator<Item = Transition>>>,
    /// Transition fetched for the pending suspension
    queued: Option<Transition>,
    deadline: Option<Instant>,
    snapshot: Snapshot,
    history: History,
}

impl Driver {
    pub fn new(problem: Problem, settings: &Settings) -> Self {
        let snapshot = problem.initial_snapshot();
        let mut history = History::new(settings.history_limit);
        history.push(snapshot.clone());

        Driver {
            problem,
            limits: settings.limits,
            initial_speed: settings.speed,
            control: RunControl {
                speed: settings.speed,
                ..RunControl::default()
            },
            transitions: None,
            queued: None,
            deadline: None,
            snapshot,
            history,
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn control(&self) -> RunControl {
        self.control
    }

    pub fn speed(&self) -> Speed {
        self.control.speed
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Position of the newest state ever reached in this run
    pub fn frontier(&self) -> usize {
        self.history.last_position().unwrap_or(0)
    }

    /// Begin a fresh run. Ignored while a run is in progress.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.control.is_running {
            log::debug!("start ignored: run already in progress");
            return false;
        }

        self.begin_run();
        self.control.is_paused = false;
        self.deadline = Some(now);
        log::info!("run started: {} ({} speed)", self.problem.title(), self.control.speed);
        true
    }

    /// Apply at most one transition if the run is playing and its deadline
    /// has passed. Returns whether the snapshot changed.
    pub fn tick<S: Sink + ?Sized>(&mut self, now: Instant, sink: &mut S) -> bool {
        if !self.control.is_playing() {
            return false;
        }
        if self.deadline.is_some_and(|deadline| now < deadline) {
            return false;
        }

        match self.advance(sink) {
            Some(kind) => {
                if self.control.is_running {
                    self.deadline = Some(now + self.control.speed.delay().mul_f32(kind.pace()));
                }
                true
            }
            None => false,
        }
    }

    /// Apply exactly one transition while auto-play is not advancing the run.
    /// With no run in progress this opens one in the paused state.
    pub fn step<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.control.is_playing() {
            return Err(DriverError::Busy);
        }

        if !self.control.is_running && !self.is_replaying() {
            if self.control.is_finished {
                return Err(DriverError::Exhausted);
            }
            self.begin_run();
            self.control.is_paused = true;
            log::info!("run opened for stepping: {}", self.problem.title());
        }

        match self.advance(sink) {
            Some(_) => Ok(()),
            None => Err(DriverError::Exhausted),
        }
    }

    /// Step until a result is produced or the run concludes
    pub fn next_result<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.step(sink)?;
        while !matches!(
            self.snapshot.kind,
            Some(TransitionKind::Emit) | Some(TransitionKind::Conclude)
        ) {
            match self.step(sink) {
                Ok(()) => {}
                Err(DriverError::Exhausted) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Restore the previous snapshot from history
    pub fn step_back(&mut self) -> Result<()> {
        if self.control.is_playing() {
            return Err(DriverError::Busy);
        }

        let previous = self
            .snapshot
            .position
            .checked_sub(1)
            .and_then(|position| self.history.get(position))
            .ok_or(DriverError::AtStart)?;
        self.snapshot = previous.clone();
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.control.is_playing() {
            self.control.is_paused = true;
            log::debug!("paused at step {}", self.snapshot.position);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.control.is_running && self.control.is_paused {
            self.control.is_paused = false;
            self.deadline = Some(now);
            log::debug!("resumed at step {}", self.snapshot.position);
        }
    }

    /// Space bar behavior: start, pause or resume depending on state
    pub fn toggle(&mut self, now: Instant) {
        if !self.control.is_running {
            self.start(now);
        } else if self.control.is_paused {
            self.resume(now);
        } else {
            self.pause();
        }
    }

    /// Cancel any run, discarding the transition waiting at the suspension
    /// point, and return to the initial snapshot and speed
    pub fn reset<S: Sink + ?Sized>(&mut self, sink: &mut S) {
        let was_running = self.control.is_running;

        if self.queued.take().is_some() {
            log::debug!("discarded in-flight transition");
        }
        self.transitions = None;
        self.deadline = None;
        self.snapshot = self.problem.initial_snapshot();
        self.history.clear();
        self.history.push(self.snapshot.clone());
        self.control = RunControl {
            speed: self.initial_speed,
            ..RunControl::default()
        };

        if was_running {
            log::info!("run cancelled");
            sink.conclude(None);
        }
    }

    /// Takes effect from the next suspension
    pub fn set_speed(&mut self, speed: Speed) {
        if self.control.speed != speed {
            log::debug!("speed {} -> {}", self.control.speed, speed);
        }
        self.control.speed = speed;
    }

    /// Swap in a new problem instance, cancelling any run
    pub fn set_problem<S: Sink + ?Sized>(&mut self, problem: Problem, sink: &mut S) {
        self.problem = problem;
        self.reset(sink);
        log::info!("problem replaced: {}", self.problem.title());
    }

    fn is_replaying(&self) -> bool {
        self.frontier() > self.snapshot.position
    }

    fn begin_run(&mut self) {
        self.snapshot = self.problem.initial_snapshot();
        self.history.clear();
        self.history.push(self.snapshot.clone());
        self.transitions = Some(self.problem.transitions(&self.limits));
        self.queued = None;
        self.control.is_running = true;
        self.control.is_finished = false;
    }

    /// Move one state forward, replaying history before consulting the
    /// iterator. Returns the kind of the state now shown.
    fn advance<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Option<TransitionKind> {
        if self.is_replaying() {
            let next = self.history.get(self.snapshot.position + 1)?.clone();
            self.snapshot = next;
            sink.narrate(&self.snapshot.narration, &self.snapshot);
            return Some(self.snapshot.kind.unwrap_or(TransitionKind::Advance));
        }

        if !self.control.is_running {
            return None;
        }

        let next = match self.queued.take() {
            Some(transition) => Some(transition),
            None => self.transitions.as_mut().and_then(|t| t.next()),
        };
        let Some(transition) = next else {
            self.finish(sink);
            return None;
        };

        let kind = transition.kind;
        transition.apply(&mut self.snapshot);
        let evicted = self.history.push(self.snapshot.clone());
        if evicted > 0 {
            log::debug!(
                "history over budget: evicted {} snapshot(s), oldest kept is {}",
                evicted,
                self.history.first_position()
            );
        }
        sink.narrate(&self.snapshot.narration, &self.snapshot);

        if self.snapshot.is_concluded() {
            self.finish(sink);
        } else {
            self.queued = self.transitions.as_mut().and_then(|t| t.next());
        }
        Some(kind)
    }

    fn finish<S: Sink + ?Sized>(&mut self, sink: &mut S) {
        self.transitions = None;
        self.queued = None;
        self.deadline = None;
        self.control.is_running = false;
        self.control.is_paused = false;
        self.control.is_finished = true;

        match &self.snapshot.outcome {
            Some(outcome) => log::info!(
                "run finished after {} step(s): {}",
                self.snapshot.position,
                outcome
            ),
            None => log::warn!("run ended without an outcome"),
        }
        sink.conclude(self.snapshot.outcome.as_ref());
    }
}
