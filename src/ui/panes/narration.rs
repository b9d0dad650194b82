//! Narration pane rendering

use super::{clamp_scroll, pane_block};
use crate::driver::Journal;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the narration pane. `current` is the position on screen, so the
/// line for the state being shown stands out after a step back.
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    journal: &Journal,
    current: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Narration ", is_focused);

    if journal.lines.is_empty() {
        let paragraph = Paragraph::new("(press space to start, → to step)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = journal
        .lines
        .iter()
        .map(|line| {
            let style = if line.position == current {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD)
            } else if line.position > current {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(format!("{:>4}  {}", line.position, line.text)).style(style)
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders
    *scroll_offset = clamp_scroll(*scroll_offset, total_items, visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
