//! Structure pane rendering
//!
//! Draws the structure under study as it stands in the snapshot. Each frame
//! family has its own layout:
//!
//! - **Pointers**: the nodes in a row with `S`/`F` markers underneath; the
//!   find-duplicate array is drawn as an index/value table instead
//! - **Intervals**: one bar per range on a shared number line, then the
//!   accepted result
//! - **Board**: N-Queens or Sudoku grid with the focused cell highlighted
//! - **Heap**: the input row with its cursor, then the heap level by level
//! - **Tree**: the tree level by level, coloured by visit state
//! - **Choices**: the current path and every result produced so far

use super::{clamp_scroll, pane_block};
use crate::algorithms::Problem;
use crate::snapshot::{
    BoardFrame, Candidate, ChoiceFrame, Frame as SnapshotFrame, HeapFrame, HeapOrder, Highlight,
    IntervalFrame, PointerFrame, Snapshot, TreeFrame,
};
use crate::structures::grid::BOX;
use crate::structures::interval::Interval;
use crate::structures::tree::{BinaryTree, NodeId};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Render the structure pane
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    problem: &Problem,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" {} ", problem.title());
    let block = pane_block(&title, is_focused);
    let width = area.width.saturating_sub(2) as usize;

    let lines = match &snapshot.frame {
        SnapshotFrame::Pointers(pointers) => pointer_lines(problem, pointers),
        SnapshotFrame::Intervals(intervals) => interval_lines(intervals, width),
        SnapshotFrame::Board(board) => board_lines(problem, board),
        SnapshotFrame::Heap(heap) => heap_lines(problem, heap),
        SnapshotFrame::Tree(tree_frame) => match problem {
            Problem::Traversal { tree, .. } | Problem::PathSum { tree, .. } => {
                tree_lines(tree, tree_frame, width)
            }
            _ => vec![Line::from("(no tree)")],
        },
        SnapshotFrame::Choices(choices) => choice_lines(problem, choices),
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn plain(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.fg))
}

fn muted(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.comment))
}

fn bold(text: impl Into<String>, color: ratatui::style::Color) -> Span<'static> {
    Span::styled(
        text.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn format_values(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(i64::to_string).collect();
    format!("[{}]", items.join(", "))
}

fn cursor_style(index: usize, frame: &PointerFrame) -> Style {
    let color = match (frame.slow == Some(index), frame.fast == Some(index)) {
        (true, true) => DEFAULT_THEME.meeting,
        (true, false) => DEFAULT_THEME.slow,
        (false, true) => DEFAULT_THEME.fast,
        (false, false) => return Style::default().fg(DEFAULT_THEME.fg),
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn cursor_marker(index: usize, frame: &PointerFrame) -> &'static str {
    match (frame.slow == Some(index), frame.fast == Some(index)) {
        (true, true) => "SF",
        (true, false) => "S",
        (false, true) => "F",
        (false, false) => "",
    }
}

fn pointer_lines(problem: &Problem, frame: &PointerFrame) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if frame.nodes.is_empty() {
        lines.push(Line::from(muted("(empty list)")));
        return lines;
    }

    let labels: Vec<String> = frame.nodes.iter().map(|n| n.value.to_string()).collect();
    let cell = labels.iter().map(String::len).max().unwrap_or(1).max(2) + 2;

    if let Problem::Duplicate(_) = problem {
        lines.push(Line::from(bold(
            format!("Phase {}", frame.phase),
            DEFAULT_THEME.primary,
        )));
        lines.push(Line::default());

        let mut index_row = vec![muted("index ")];
        let mut value_row = vec![muted("value ")];
        let mut marker_row = vec![plain("      ")];
        for (i, label) in labels.iter().enumerate() {
            index_row.push(muted(format!("{:^cell$}", i)));
            value_row.push(Span::styled(format!("{:^cell$}", label), cursor_style(i, frame)));
            marker_row.push(Span::styled(
                format!("{:^cell$}", cursor_marker(i, frame)),
                cursor_style(i, frame),
            ));
        }
        lines.push(Line::from(index_row));
        lines.push(Line::from(value_row));
        lines.push(Line::from(marker_row));
        lines.push(Line::default());
        lines.push(Line::from(muted("each index i links to index value[i]")));
        return lines;
    }

    let arrow = " → ";
    let mut node_row = Vec::new();
    let mut marker_row = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        node_row.push(Span::styled(
            format!("{:^cell$}", format!("({})", label)),
            cursor_style(i, frame),
        ));
        marker_row.push(Span::styled(
            format!("{:^cell$}", cursor_marker(i, frame)),
            cursor_style(i, frame),
        ));
        if i + 1 < labels.len() {
            node_row.push(muted(arrow));
            marker_row.push(plain(" ".repeat(arrow.chars().count())));
        }
    }

    match (frame.nodes.last().and_then(|node| node.next), problem) {
        (_, Problem::Happy(_)) => {}
        (Some(target), _) => node_row.push(muted(format!(" ↺ node {}", target))),
        (None, _) => node_row.push(muted(" → null")),
    }

    lines.push(Line::from(node_row));
    lines.push(Line::from(marker_row));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        bold("S", DEFAULT_THEME.slow),
        muted(" slow   "),
        bold("F", DEFAULT_THEME.fast),
        muted(" fast   "),
        bold("SF", DEFAULT_THEME.meeting),
        muted(" both"),
    ]));
    lines
}

fn interval_span(intervals: &[&Interval]) -> (i64, i64) {
    let low = intervals.iter().map(|i| i.start).min().unwrap_or(0);
    let high = intervals.iter().map(|i| i.end).max().unwrap_or(0);
    (low, high.max(low.saturating_add(1)))
}

fn bar_line(
    interval: &Interval,
    low: i64,
    high: i64,
    columns: usize,
    label_width: usize,
    style: Style,
) -> Line<'static> {
    // Widened: the span of two i64 endpoints can exceed i64
    let span = (i128::from(high) - i128::from(low)).max(1);
    let last_column = columns.saturating_sub(1) as i128;
    let scale = |x: i64| {
        let offset = (i128::from(x) - i128::from(low)).clamp(0, span);
        (offset * last_column / span) as usize
    };
    let from = scale(interval.start);
    let to = scale(interval.end).max(from);

    Line::from(vec![
        Span::styled(format!("{:<label_width$}", interval.to_string()), style),
        plain(" ".repeat(from)),
        Span::styled("█".repeat(to - from + 1), style),
    ])
}

fn interval_lines(frame: &IntervalFrame, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if frame.sorted.is_empty() && frame.pending.is_none() {
        lines.push(Line::from(muted("(no intervals)")));
        return lines;
    }

    let everything: Vec<&Interval> = frame
        .sorted
        .iter()
        .chain(frame.accepted.iter())
        .chain(frame.pending.iter())
        .collect();
    let (low, high) = interval_span(&everything);
    let label_width = everything
        .iter()
        .map(|i| i.to_string().len())
        .max()
        .unwrap_or(5)
        + 2;
    let columns = width.saturating_sub(label_width + 1).max(8);

    for (index, interval) in frame.sorted.iter().enumerate() {
        let style = if frame.cursor == Some(index) {
            let color = match frame.highlight {
                Highlight::Conflict => DEFAULT_THEME.error,
                Highlight::Merging => DEFAULT_THEME.secondary,
                Highlight::Accepted | Highlight::Idle => DEFAULT_THEME.fast,
            };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if frame.rejected.contains(&index) {
            Style::default().fg(DEFAULT_THEME.error)
        } else if frame.cursor.is_some_and(|cursor| index < cursor) {
            Style::default().fg(DEFAULT_THEME.comment)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(bar_line(interval, low, high, columns, label_width, style));
    }

    if let Some(pending) = &frame.pending {
        lines.push(Line::default());
        lines.push(Line::from(bold("New interval", DEFAULT_THEME.secondary)));
        lines.push(bar_line(
            pending,
            low,
            high,
            columns,
            label_width,
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
    }

    lines.push(Line::default());
    lines.push(Line::from(bold("Result", DEFAULT_THEME.result)));
    if frame.accepted.is_empty() {
        lines.push(Line::from(muted("(empty)")));
    }
    for interval in &frame.accepted {
        lines.push(bar_line(
            interval,
            low,
            high,
            columns,
            label_width,
            Style::default().fg(DEFAULT_THEME.result),
        ));
    }
    lines
}

fn board_lines(problem: &Problem, frame: &BoardFrame) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if frame.size == 0 {
        lines.push(Line::from(muted("(empty board)")));
        return lines;
    }

    let sudoku = matches!(problem, Problem::Sudoku(_));
    for row in 0..frame.size {
        if sudoku && row > 0 && row % BOX == 0 {
            lines.push(Line::from(muted("──────┼───────┼──────")));
        }
        let mut spans = Vec::new();
        for col in 0..frame.size {
            if sudoku && col > 0 && col % BOX == 0 {
                spans.push(muted("│ "));
            }
            let value = frame.cell(row, col);
            let focused = frame.focus == Some((row, col));
            let (text, style) = if sudoku {
                let text = if value == 0 { "·".to_string() } else { value.to_string() };
                let style = if focused {
                    Style::default()
                        .fg(DEFAULT_THEME.fast)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if frame.is_given(row, col) {
                    Style::default().fg(DEFAULT_THEME.given).add_modifier(Modifier::BOLD)
                } else if value == 0 {
                    Style::default().fg(DEFAULT_THEME.comment)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                (text, style)
            } else if value != 0 {
                let color = if focused { DEFAULT_THEME.fast } else { DEFAULT_THEME.result };
                ("♛".to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                let shade = if (row + col) % 2 == 0 { "·" } else { " " };
                (shade.to_string(), Style::default().fg(DEFAULT_THEME.comment))
            };
            spans.push(Span::styled(text, style));
            spans.push(plain(" "));
        }
        lines.push(Line::from(spans));
    }

    if !sudoku {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            muted("Solutions found: "),
            bold(frame.solutions.to_string(), DEFAULT_THEME.result),
        ]));
    }
    lines
}

fn input_row(problem: &Problem, cursor: Option<usize>) -> Vec<Span<'static>> {
    let items: Vec<String> = match problem {
        Problem::KthLargest { values, .. } => values.iter().map(i64::to_string).collect(),
        Problem::TopFrequent { values, .. } => {
            crate::algorithms::top_k::count_frequencies(values)
                .iter()
                .map(|(value, count)| format!("{}×{}", value, count))
                .collect()
        }
        Problem::Closest { points, .. } => points.iter().map(|p| p.to_string()).collect(),
        _ => Vec::new(),
    };

    let mut spans = vec![muted("Input: ")];
    for (index, item) in items.into_iter().enumerate() {
        let style = if cursor == Some(index) {
            Style::default()
                .fg(DEFAULT_THEME.fast)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if cursor.is_some_and(|c| index < c) {
            Style::default().fg(DEFAULT_THEME.comment)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(item, style));
        spans.push(plain(" "));
    }
    spans
}

fn describe(candidate: &Candidate, key: i64) -> String {
    match candidate {
        Candidate::Point(point) => format!("{} d²={}", point, key),
        _ => candidate.to_string(),
    }
}

fn heap_lines(problem: &Problem, frame: &HeapFrame) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(input_row(problem, frame.cursor)), Line::default()];

    let kind = match frame.order {
        HeapOrder::Min => "Min-heap",
        HeapOrder::Max => "Max-heap",
    };
    lines.push(Line::from(vec![
        bold(kind, DEFAULT_THEME.primary),
        muted(format!(" ({}/{})", frame.items.len(), frame.capacity)),
    ]));

    if frame.items.is_empty() {
        lines.push(Line::from(muted("(empty)")));
    }

    let mut start = 0;
    let mut level = 0;
    while start < frame.items.len() {
        let end = (start + (1 << level)).min(frame.items.len());
        let mut spans = vec![muted(format!("L{} ", level))];
        for (offset, item) in frame.items[start..end].iter().enumerate() {
            let style = if start + offset == 0 {
                Style::default().fg(DEFAULT_THEME.result).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(describe(&item.candidate, item.key), style));
            spans.push(plain("  "));
        }
        lines.push(Line::from(spans));
        start = end;
        level += 1;
    }

    if let Some(evicted) = &frame.evicted {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            muted("Evicted: "),
            bold(describe(&evicted.candidate, evicted.key), DEFAULT_THEME.error),
        ]));
    }
    lines
}

/// Horizontal position of every node as a fraction of the pane width. Each
/// child sits halfway between its parent and the parent's outer bound.
fn tree_positions(tree: &BinaryTree) -> FxHashMap<NodeId, f64> {
    let mut positions = FxHashMap::default();
    let mut stack: Vec<(NodeId, f64, f64)> =
        tree.root().map(|root| (root, 0.5, 0.25)).into_iter().collect();

    while let Some((id, position, offset)) = stack.pop() {
        positions.insert(id, position);
        if let Some(node) = tree.node(id) {
            stack.extend(node.left.map(|l| (l, position - offset, offset / 2.0)));
            stack.extend(node.right.map(|r| (r, position + offset, offset / 2.0)));
        }
    }
    positions
}

fn tree_lines(tree: &BinaryTree, frame: &TreeFrame, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if tree.is_empty() {
        lines.push(Line::from(muted("(empty tree)")));
        return lines;
    }

    let positions = tree_positions(tree);
    let on_path: FxHashSet<NodeId> = frame.path.iter().copied().collect();
    let width = width.max(16);

    for level in tree.levels() {
        let mut placed: Vec<(usize, NodeId)> = level
            .iter()
            .filter_map(|&id| {
                let position = positions.get(&id).copied()?;
                Some(((position * width as f64) as usize, id))
            })
            .collect();
        placed.sort_unstable();

        let mut spans = Vec::new();
        let mut cursor = 0;
        for (column, id) in placed {
            let label = tree.value(id).map(|v| v.to_string()).unwrap_or_default();
            let column = column.saturating_sub(label.len() / 2).max(cursor);
            spans.push(plain(" ".repeat(column - cursor)));

            let style = if frame.current == Some(id) {
                Style::default()
                    .fg(DEFAULT_THEME.slow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if on_path.contains(&id) {
                Style::default().fg(DEFAULT_THEME.fast).add_modifier(Modifier::BOLD)
            } else if frame.visited.contains(&id) {
                Style::default().fg(DEFAULT_THEME.result)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            cursor = column + label.len() + 1;
            spans.push(Span::styled(label, style));
            spans.push(plain(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines.push(Line::from(vec![muted("Order: "), plain(format_values(&frame.order))]));
    lines.push(Line::from(vec![
        muted("Visited: "),
        plain(format!("{} of {} nodes", frame.visited.len(), tree.len())),
    ]));
    if let Some(level) = frame.level {
        lines.push(Line::from(vec![muted("Level: "), plain(level.to_string())]));
    }
    if !frame.path.is_empty() {
        let values: Vec<i64> = frame.path.iter().filter_map(|&id| tree.value(id)).collect();
        lines.push(Line::from(vec![
            muted("Path: "),
            bold(format_values(&values), DEFAULT_THEME.fast),
        ]));
    }
    for path in &frame.paths {
        lines.push(Line::from(vec![
            muted("Found: "),
            bold(format_values(path), DEFAULT_THEME.result),
        ]));
    }
    lines
}

fn choice_lines(problem: &Problem, frame: &ChoiceFrame) -> Vec<Line<'static>> {
    let input = match problem {
        Problem::Subsets(values)
        | Problem::Permutations(values)
        | Problem::Combinations { values, .. } => format_values(values),
        _ => String::new(),
    };

    let mut lines = vec![
        Line::from(vec![muted("Input:   "), plain(input)]),
        Line::from(vec![
            muted("Current: "),
            bold(format_values(&frame.path), DEFAULT_THEME.fast),
        ]),
        Line::default(),
    ];

    let heading = match problem.expected_count() {
        Some(expected) => format!("Results ({} of {})", frame.results.len(), expected),
        None => format!("Results ({})", frame.results.len()),
    };
    lines.push(Line::from(bold(heading, DEFAULT_THEME.result)));

    for (index, result) in frame.results.iter().enumerate() {
        lines.push(Line::from(vec![
            muted(format!("{:>3}. ", index + 1)),
            plain(format_values(result)),
        ]));
    }
    lines
}
