use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::DayPanel;
use crate::calendar::{date_key, Event};
use crate::theme::{self, Theme};

pub struct DayView;

impl DayView {
    /// Entries of one day. `cursor` highlights a row when the list is focused.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[Event],
        cursor: Option<usize>,
        theme: &Theme,
    ) {
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let count_str = match events.len() {
            0 => String::new(),
            1 => " 1 entry ".to_string(),
            n => format!(" {n} entries "),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border)
            .style(theme.base);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No entries for this day").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = events
            .iter()
            .enumerate()
            .map(|(i, ev)| {
                let item = event_item(ev, theme);
                if cursor == Some(i) {
                    item.style(theme.highlight)
                } else {
                    item
                }
            })
            .collect();

        // Keep the cursor row on screen.
        let visible = area.height.saturating_sub(2) as usize;
        let skip = cursor
            .map(|c| (c + 1).saturating_sub(visible))
            .unwrap_or(0);
        let list = List::new(items.into_iter().skip(skip).collect::<Vec<_>>()).block(block);
        frame.render_widget(list, area);
    }
}

pub fn event_item(ev: &Event, theme: &Theme) -> ListItem<'static> {
    let category = ev.category();
    let marker = Span::styled("  ", Style::default().bg(theme::category_color(category)));
    let time = Span::styled(
        format!(" {:<8} ", ev.time_display()),
        Style::default().add_modifier(Modifier::DIM),
    );
    let text = Span::styled(ev.text.clone(), Style::default());
    let cat = Span::styled(format!("  {}", category.name()), theme.dim);

    ListItem::new(Line::from(vec![marker, time, text, cat]))
}

/// The popup listing one day's entries, opened from the month grid.
pub fn render_day_panel(frame: &mut Frame, area: Rect, panel: &DayPanel, theme: &Theme) {
    let popup_w = area.width.clamp(30, 64).min(area.width);
    let popup_h = area.height.clamp(8, 18).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let [list_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(popup_area);

    match date_key::decode(&panel.date) {
        Ok(date) => DayView::render(
            frame,
            list_area,
            date,
            &panel.events,
            Some(panel.cursor),
            theme,
        ),
        Err(_) => frame.render_widget(Paragraph::new(panel.date.as_str()), list_area),
    }

    let key = Style::default().add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::styled(" n", key),
        Span::styled(":Add ", theme.dim),
        Span::styled("d", key),
        Span::styled(":Delete ", theme.dim),
        Span::styled("j/k", key),
        Span::styled(":Move ", theme.dim),
        Span::styled("Esc", key),
        Span::styled(":Close", theme.dim),
    ]);
    frame.render_widget(Paragraph::new(hint).style(theme.status), hint_area);
}
