use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Build a footer line of `[key] label` pairs.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        if idx + 1 == hints.len() {
            spans.push(Span::raw(format!(" {label}")));
        } else {
            spans.push(Span::raw(format!(" {label}   ")));
        }
    }
    Line::from(spans)
}

/// Move `current` by `offset` within `0..len`, stopping at either end.
pub(crate) fn step_index(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = current as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}
