use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::MonthGrid;
use crate::calendar::Category;
use crate::config::WeekStart;
use crate::theme::{self, Theme};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        selected_date: NaiveDate,
        today: NaiveDate,
        week_start: WeekStart,
        theme: &Theme,
    ) {
        let title = format!(" {} {} ", month_name(grid.month), grid.year);

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border)
            .style(theme.base);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(first_day) = NaiveDate::from_ymd_opt(grid.year, grid.month, 1) else {
            return;
        };
        let cell_w = (inner.width / 7).max(4) as usize;
        let offset = leading_blanks(first_day.weekday(), week_start);
        let days_in_month = days_in_month(grid.year, grid.month);

        let header: Vec<Span> = (0..7)
            .map(|i| {
                let name = DAY_NAMES[(i + week_start_index(week_start)) % 7];
                Span::styled(format!("{:^cell_w$}", name), theme.header)
            })
            .collect();

        // Two lines per week: day numbers, then category marks.
        let mut lines: Vec<Line> = vec![Line::from(header)];
        let mut current_day: i32 = 1 - offset as i32;

        while current_day <= days_in_month as i32 {
            let mut numbers: Vec<Span> = Vec::new();
            let mut marks: Vec<Span> = Vec::new();
            for _ in 0..7 {
                if current_day < 1 || current_day > days_in_month as i32 {
                    numbers.push(Span::raw(" ".repeat(cell_w)));
                    marks.push(Span::raw(" ".repeat(cell_w)));
                } else {
                    let day = current_day as u32;
                    let style = day_style(grid, day, selected_date, today, theme);
                    numbers.push(Span::styled(format!(" {:>2}", day), style));
                    numbers.push(Span::raw(" ".repeat(cell_w.saturating_sub(3))));
                    marks.extend(indicator_spans(grid.summaries.get(&day), cell_w));
                }
                current_day += 1;
            }
            lines.push(Line::from(numbers));
            lines.push(Line::from(marks));
        }

        let mut constraints: Vec<Constraint> = lines.iter().map(|_| Constraint::Length(1)).collect();
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, line) in lines.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(line), rows[i]);
        }
    }
}

fn day_style(grid: &MonthGrid, day: u32, selected: NaiveDate, today: NaiveDate, theme: &Theme) -> Style {
    let date = NaiveDate::from_ymd_opt(grid.year, grid.month, day);
    if date == Some(selected) && date == Some(today) {
        theme.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if date == Some(selected) {
        theme.selected
    } else if date == Some(today) {
        theme.today
    } else if grid.summaries.contains_key(&day) {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// One dot per category, as many as fit in the cell.
fn indicator_spans(categories: Option<&Vec<String>>, cell_w: usize) -> Vec<Span<'static>> {
    let room = cell_w.saturating_sub(1);
    let mut spans = vec![Span::raw(" ")];
    let mut used = 0;
    for key in categories.into_iter().flatten().take(room) {
        let color = theme::category_color(Category::from_key(key));
        spans.push(Span::styled("\u{25cf}", Style::default().fg(color)));
        used += 1;
    }
    spans.push(Span::raw(" ".repeat(room - used)));
    spans
}

fn week_start_index(week_start: WeekStart) -> usize {
    match week_start {
        WeekStart::Sunday => 0,
        WeekStart::Monday => 1,
    }
}

fn leading_blanks(first: Weekday, week_start: WeekStart) -> usize {
    match week_start {
        WeekStart::Sunday => first.num_days_from_sunday() as usize,
        WeekStart::Monday => first.num_days_from_monday() as usize,
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn blanks_depend_on_week_start() {
        // June 1st 2024 is a Saturday.
        let first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().weekday();
        assert_eq!(leading_blanks(first, WeekStart::Sunday), 6);
        assert_eq!(leading_blanks(first, WeekStart::Monday), 5);
    }

    #[test]
    fn indicators_fill_the_cell_width() {
        let cats = vec!["work".to_string(), "health".to_string(), "finance".to_string()];
        let spans = indicator_spans(Some(&cats), 3);
        let width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(width, 3);
        assert_eq!(spans.len(), 4);
    }
}
