mod app;
mod calendar;
mod cli;
mod command;
mod components;
mod config;
mod error;
mod logging;
mod preferences;
mod storage;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode, Projection};
use clap::Parser;
use color_eyre::Result;
use command::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use preferences::ViewMode;
use ratatui::layout::{Constraint, Layout, Rect};
use storage::{FileStorage, Storage};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::Config::load(&config_path)?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref());

    let filter = cli.log_level.as_deref().or(config.log_level.as_deref());
    let log_path = logging::init(&data_dir, filter)?;
    eprintln!("Logging to {}", log_path.display());

    let storage = FileStorage::new(&data_dir);
    log::info!("starting with data in {}", storage.dir().display());
    let mut app = App::new(storage, config.week_start);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    log::info!("exiting");
    result
}

fn run<S: Storage>(terminal: &mut tui::Tui, app: &mut App<S>) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = tui::next_key_press(Duration::from_millis(250))? {
            app.status_message = None;
            handle_key(app, key);
        }
    }
    Ok(())
}

fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Form => handle_form_key(app, key.code),
        InputMode::Search => handle_search_key(app, key.code),
        InputMode::Day => handle_day_key(app, key.code),
        InputMode::Normal => handle_normal_key(app, key.code, key.modifiers),
    }
}

fn handle_normal_key<S: Storage>(app: &mut App<S>, code: KeyCode, modifiers: KeyModifiers) {
    let agenda = app.view_mode == ViewMode::Agenda;
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.dispatch(Command::Quit)
        }
        (KeyCode::Char('v'), _) => app.dispatch(Command::SetViewMode(app.view_mode.toggled())),
        (KeyCode::Char('T'), _) => app.dispatch(Command::SetTheme(app.theme_name.next())),
        (KeyCode::Char('/'), _) => app.input_mode = InputMode::Search,
        (KeyCode::Char('?'), _) => app.show_help = true,
        (KeyCode::Char('t'), _) => app.dispatch(Command::GoToToday),
        (KeyCode::Char('['), _) => app.dispatch(Command::ChangeMonth(-1)),
        (KeyCode::Char(']'), _) => app.dispatch(Command::ChangeMonth(1)),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) if agenda => app.move_agenda_cursor(-1),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) if agenda => app.move_agenda_cursor(1),
        (KeyCode::Char('d'), _) if agenda => {
            if let Some((date, event)) = app.selected_agenda_entry() {
                let command = Command::DeleteEvent {
                    date: date.to_string(),
                    id: event.id,
                };
                app.dispatch(command);
            }
        }
        (KeyCode::Enter, _) if agenda => {
            if let Some((date, _)) = app.selected_agenda_entry() {
                let date = date.to_string();
                app.dispatch(Command::OpenDay(date));
            }
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.dispatch(Command::MoveDays(-1)),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.dispatch(Command::MoveDays(1)),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.dispatch(Command::MoveDays(-7)),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.dispatch(Command::MoveDays(7)),
        (KeyCode::Enter, _) => app.dispatch(Command::OpenDay(app.selected_date_key())),
        (KeyCode::Char('n'), _) => {
            app.dispatch(Command::OpenDay(app.selected_date_key()));
            app.open_event_form();
        }
        _ => {}
    }
}

fn handle_day_key<S: Storage>(app: &mut App<S>, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.dispatch(Command::CloseDay),
        KeyCode::Up | KeyCode::Char('k') => app.move_day_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_day_cursor(1),
        KeyCode::Char('n') => app.open_event_form(),
        KeyCode::Char('d') | KeyCode::Delete => {
            let target = app
                .day_panel
                .as_ref()
                .and_then(|panel| panel.selected().map(|e| (panel.date.clone(), e.id)));
            if let Some((date, id)) = target {
                app.dispatch(Command::DeleteEvent { date, id });
            }
        }
        _ => {}
    }
}

fn handle_search_key<S: Storage>(app: &mut App<S>, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.dispatch(Command::ClearSearch);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            let mut term = app.search_term.clone();
            term.pop();
            app.dispatch(Command::SetSearchTerm(term));
        }
        KeyCode::Char(c) => {
            let term = format!("{}{}", app.search_term, c);
            app.dispatch(Command::SetSearchTerm(term));
        }
        _ => {}
    }
}

fn handle_form_key<S: Storage>(app: &mut App<S>, code: KeyCode) {
    if code == KeyCode::Esc {
        app.close_event_form();
        return;
    }
    if code == KeyCode::Enter {
        app.submit_event_form();
        return;
    }
    let Some(form) = app.form_state.as_mut() else {
        return;
    };
    match code {
        KeyCode::Tab => form.active_field = form.active_field.next(),
        KeyCode::BackTab => form.active_field = form.active_field.prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Left => form.cycle_category(false),
        KeyCode::Right => form.cycle_category(true),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
}

fn draw<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>) {
    let area = frame.area();
    let theme = &app.theme;

    let [search_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    components::SearchBar::render(
        frame,
        search_area,
        &app.search_term,
        app.input_mode == InputMode::Search,
        app.view_mode == ViewMode::Agenda,
        theme,
    );

    match &app.projection {
        Projection::Month(grid) => render_month_layout(frame, content_area, app, grid),
        Projection::Agenda(groups) => components::AgendaView::render(
            frame,
            content_area,
            groups,
            app.agenda_cursor,
            &app.search_term,
            theme,
        ),
    }

    if let Some(panel) = &app.day_panel {
        components::day_view::render_day_panel(frame, content_area, panel, theme);
    }
    if let Some(form) = &app.form_state {
        components::EventForm::render(frame, area, form, theme);
    }
    if app.show_help {
        components::help::render_help(frame, area, theme);
    }

    components::StatusBar::render(frame, status_area, app);
}

fn render_month_layout<S: Storage>(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App<S>,
    grid: &app::MonthGrid,
) {
    let theme = &app.theme;
    if area.width < 80 {
        components::MonthView::render(
            frame,
            area,
            grid,
            app.navigation_date,
            app.today,
            app.week_start,
            theme,
        );
        return;
    }

    let [month_area, day_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Min(20)]).areas(area);
    components::MonthView::render(
        frame,
        month_area,
        grid,
        app.navigation_date,
        app.today,
        app.week_start,
        theme,
    );
    components::DayView::render(
        frame,
        day_area,
        app.navigation_date,
        &app.selected_day_events(),
        None,
        theme,
    );
}
