use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::AgendaGroup;
use crate::components::day_view::event_item;
use crate::theme::Theme;

pub struct AgendaView;

impl AgendaView {
    /// Date headers followed by that date's entries. `cursor` indexes entries
    /// across all groups, ignoring headers.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        groups: &[AgendaGroup],
        cursor: usize,
        search_term: &str,
        theme: &Theme,
    ) {
        let title = if search_term.is_empty() {
            " Agenda ".to_string()
        } else {
            format!(" Agenda: \"{search_term}\" ")
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border)
            .style(theme.base);

        if groups.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(empty_message(search_term)).style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let mut items: Vec<ListItem> = Vec::new();
        let mut cursor_row = 0;
        let mut index = 0;
        for group in groups {
            let header = match group.day() {
                Some(day) => day.format("%A, %B %-d, %Y").to_string(),
                None => group.date.clone(),
            };
            if !items.is_empty() {
                items.push(ListItem::new(Line::from("")));
            }
            items.push(ListItem::new(Line::from(Span::styled(
                header,
                theme.header.add_modifier(Modifier::UNDERLINED),
            ))));

            for ev in &group.events {
                let item = event_item(ev, theme);
                if index == cursor {
                    cursor_row = items.len();
                    items.push(item.style(theme.highlight));
                } else {
                    items.push(item);
                }
                index += 1;
            }
        }

        let visible = area.height.saturating_sub(2) as usize;
        let skip = (cursor_row + 1).saturating_sub(visible);
        let list = List::new(items.into_iter().skip(skip).collect::<Vec<_>>()).block(block);
        frame.render_widget(list, area);
    }
}

fn empty_message(search_term: &str) -> &'static str {
    if search_term.is_empty() {
        "No entries"
    } else {
        "No entries match your search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_agenda_message_covers_past_and_future() {
        assert_eq!(empty_message(""), "No entries");
        assert_eq!(empty_message("rent"), "No entries match your search");
    }
}
