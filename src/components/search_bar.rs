use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct SearchBar;

impl SearchBar {
    pub fn render(frame: &mut Frame, area: Rect, term: &str, focused: bool, agenda: bool, theme: &Theme) {
        let label = Span::styled(" Search: ", theme.dim);
        let value = if term.is_empty() && !focused {
            Span::styled("press / to search entries", theme.dim)
        } else if focused {
            Span::styled(format!("{term}_"), theme.accent)
        } else {
            Span::raw(term.to_string())
        };

        let mut spans = vec![label, value];
        if !term.is_empty() && !agenda {
            spans.push(Span::styled("  (applies to the agenda view)", theme.dim));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base), area);
    }
}
