use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::preferences::ViewMode;
use crate::storage::Storage;

pub struct StatusBar;

impl StatusBar {
    pub fn render<S: Storage>(frame: &mut Frame, area: Rect, app: &App<S>) {
        let w = area.width as usize;
        let theme = &app.theme;

        let mode_str = match app.view_mode {
            ViewMode::Calendar => "[Calendar]",
            ViewMode::Agenda => "[Agenda]",
        };
        let focus = match app.input_mode {
            InputMode::Search => " [Search]",
            InputMode::Day => " [Day]",
            InputMode::Form => " [New Entry]",
            InputMode::Normal => "",
        };

        let right_text = match &app.status_message {
            Some(msg) => format!(" {msg} "),
            None => hints(app.view_mode, app.input_mode, w),
        };

        let left = format!(
            " {}{}  {} entries  {} ",
            mode_str,
            focus,
            app.store().len(),
            app.theme_name.as_str()
        );
        let padding_len = w.saturating_sub(left.len() + right_text.len());

        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(" ".repeat(padding_len), theme.status),
            Span::styled(right_text, theme.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

fn hints(view: ViewMode, mode: InputMode, w: usize) -> String {
    let hint = match (mode, view) {
        (InputMode::Search, _) => " type to filter  Enter:Done  Esc:Clear",
        (InputMode::Form, _) => " Tab:Next  Enter:Save  Esc:Cancel",
        (InputMode::Day, _) => " n:New  d:Delete  Esc:Close",
        (InputMode::Normal, ViewMode::Calendar) if w >= 80 => {
            " hjkl:Nav [/]:Month t:Today Enter:Open n:New v:View /:Search ?:Help q:Quit"
        }
        (InputMode::Normal, ViewMode::Agenda) if w >= 70 => {
            " jk:Move d:Delete v:View /:Search T:Theme ?:Help q:Quit"
        }
        (InputMode::Normal, _) if w >= 40 => " v:View /:Search ?:Help q:Quit",
        _ => " ?:Help q:Quit",
    };
    hint.to_string()
}
