use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("h/l \u{2190}/\u{2192}", "Previous/next day"),
            ("j/k \u{2191}/\u{2193}", "Previous/next week, or move in lists"),
            ("[/]", "Previous/next month"),
            ("t", "Jump to today"),
        ],
    ),
    (
        "Views",
        &[
            ("v", "Toggle calendar / agenda"),
            ("/", "Search the agenda"),
            ("T", "Cycle theme"),
        ],
    ),
    (
        "Entries",
        &[
            ("Enter", "Open the selected day"),
            ("n", "New entry on the selected day"),
            ("d", "Delete the selected entry"),
            ("q / Esc", "Quit / close popup"),
        ],
    ),
];

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_w = area.width.clamp(30, 56).min(area.width);
    let popup_h = area.height.clamp(12, 20).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.accent)
        .borders(Borders::ALL)
        .border_style(theme.accent)
        .style(theme.base);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.accent;
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (section, keys)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*section, section_style)));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), key_style),
                Span::raw(*desc),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
