//! Counters, run state and outcome

use super::pane_block;
use crate::algorithms::Problem;
use crate::driver::RunControl;
use crate::snapshot::{History, Snapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn state_label(control: &RunControl) -> (&'static str, ratatui::style::Color) {
    if control.is_playing() {
        ("playing", DEFAULT_THEME.secondary)
    } else if control.is_running {
        ("paused", DEFAULT_THEME.primary)
    } else if control.is_finished {
        ("finished", DEFAULT_THEME.success)
    } else {
        ("idle", DEFAULT_THEME.comment)
    }
}

/// Render the stats pane
pub fn render_stats_pane(
    frame: &mut Frame,
    area: Rect,
    problem: &Problem,
    snapshot: &Snapshot,
    control: &RunControl,
    history: &History,
    is_focused: bool,
) {
    let block = pane_block(" Stats ", is_focused);
    let (state, state_color) = state_label(control);
    let counters = &snapshot.counters;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<12}", "State"), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                state,
                Style::default().fg(state_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        row("Speed", control.speed.to_string()),
        row("Step", snapshot.position.to_string()),
        row("Attempts", counters.attempts.to_string()),
        row("Backtracks", counters.backtracks.to_string()),
        row("Operations", counters.operations.to_string()),
    ];

    if let Some(expected) = problem.expected_count() {
        lines.push(row("Expected", expected.to_string()));
    }

    lines.push(row(
        "History",
        format!(
            "{} step(s), {} KiB / {} MiB",
            history.len(),
            history.memory_usage() / 1024,
            history.memory_limit() / (1024 * 1024)
        ),
    ));

    lines.push(Line::default());
    match &snapshot.outcome {
        Some(outcome) => {
            lines.push(Line::from(Span::styled(
                "Outcome",
                Style::default()
                    .fg(DEFAULT_THEME.result)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                outcome.to_string(),
                Style::default().fg(DEFAULT_THEME.result),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "(no outcome yet)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))),
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
