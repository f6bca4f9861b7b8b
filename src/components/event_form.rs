use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{date_key, Category, NewEvent};
use crate::theme::{self, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Category,
    Time,
    AllDay,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Time,
            FormField::Time => FormField::AllDay,
            FormField::AllDay => FormField::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Text => FormField::AllDay,
            FormField::Category => FormField::Text,
            FormField::Time => FormField::Category,
            FormField::AllDay => FormField::Time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormState {
    pub date: String,
    pub text: String,
    pub category: Category,
    pub time: String,
    pub is_all_day: bool,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: String::new(),
            category: Category::default(),
            time: String::new(),
            is_all_day: false,
            active_field: FormField::Text,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Text => self.text.push(c),
            FormField::Time if !self.is_all_day && (c.is_ascii_digit() || c == ':') => {
                if self.time.len() < 5 {
                    self.time.push(c);
                }
            }
            FormField::Category if c == ' ' => self.category = self.category.next(),
            FormField::AllDay if c == ' ' => self.toggle_all_day(),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Text => {
                self.text.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
            FormField::Category | FormField::AllDay => {}
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.prev()
        };
    }

    pub fn toggle_all_day(&mut self) {
        self.is_all_day = !self.is_all_day;
        if self.is_all_day {
            self.time.clear();
        }
    }

    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            text: self.text.clone(),
            category: self.category.key().to_string(),
            time: if self.is_all_day {
                String::new()
            } else {
                self.time.clone()
            },
            is_all_day: self.is_all_day,
        }
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState, theme: &Theme) {
        let form_w = area.width.clamp(30, 50);
        let form_h = area.height.clamp(9, 11);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w.min(area.width), form_h.min(area.height));

        frame.render_widget(Clear, form_area);

        let title = match date_key::decode(&state.date) {
            Ok(day) => format!(" New entry for {} ", format_day(day)),
            Err(_) => " New entry ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent)
            .style(theme.base);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // text
            Constraint::Length(1), // category
            Constraint::Length(1), // time
            Constraint::Length(1), // all day
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let active = |field: FormField| state.active_field == field;

        render_field(frame, rows[0], "Text:", &state.text, active(FormField::Text), theme);

        let category = Line::from(vec![
            Span::styled(format!("{:<7}", "Cat:"), theme.dim),
            Span::styled(
                "\u{25cf} ",
                Style::default().fg(theme::category_color(state.category)),
            ),
            Span::styled(
                format!("< {} >", state.category.name()),
                field_style(active(FormField::Category)),
            ),
        ]);
        frame.render_widget(Paragraph::new(category), rows[1]);

        if state.is_all_day {
            render_field(frame, rows[2], "Time:", "--:--", false, theme);
        } else {
            let time = if state.time.is_empty() && !active(FormField::Time) {
                "any time"
            } else {
                state.time.as_str()
            };
            render_field(frame, rows[2], "Time:", time, active(FormField::Time), theme);
        }

        let all_day = if state.is_all_day { "[x] All Day" } else { "[ ] All Day" };
        render_field(frame, rows[3], "", all_day, active(FormField::AllDay), theme);

        let key = Style::default().add_modifier(Modifier::BOLD);
        let help = Line::from(vec![
            Span::styled("Tab", key),
            Span::styled(":Next ", theme.dim),
            Span::styled("Space", key),
            Span::styled(":Toggle ", theme.dim),
            Span::styled("Enter", key),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", key),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%a %b %d, %Y").to_string()
}

fn field_style(active: bool) -> Style {
    if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool, theme: &Theme) {
    let cursor = if active { "_" } else { "" };

    let mut spans = Vec::new();
    if !label.is_empty() {
        spans.push(Span::styled(format!("{:<7}", label), theme.dim));
    }
    spans.push(Span::styled(format!("{}{}", value, cursor), field_style(active)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
