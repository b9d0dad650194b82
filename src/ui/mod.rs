//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop and pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (structure,
//!   narration, stats, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Driver`] and
//! call [`App::run`] to start the event loop. The loop feeds the driver the
//! current time on every iteration; the driver alone decides when the next
//! transition is due.
//!
//! [`Driver`]: crate::driver::Driver
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
