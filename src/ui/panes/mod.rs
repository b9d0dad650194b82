//! TUI pane rendering modules
//!
//! Every pane is a plain function of the problem and the snapshot it is
//! handed. Panes never touch the driver, so drawing the same snapshot twice
//! produces the same buffer.
//!
//! # Pane Modules
//!
//! - [`structure`]: the structure under study with cursors, ranges, boards,
//!   heaps, trees or the current choice path
//! - [`narration`]: the running description of each applied transition
//! - [`stats`]: counters, run state, history usage and the outcome
//! - [`status`]: status bar with keybindings and run state

pub mod narration;
pub mod stats;
pub mod status;
pub mod structure;

pub use narration::render_narration_pane;
pub use stats::render_stats_pane;
pub use status::render_status_bar;
pub use structure::render_structure_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block, highlighted when the pane has focus
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp a scroll offset so the last page stays full
fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}
