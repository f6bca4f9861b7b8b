use std::collections::BTreeMap;

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::calendar::{date_key, query, AgendaGroup, Event, EventStore, NewEvent};
use crate::command::Command;
use crate::components::event_form::EventFormState;
use crate::config::WeekStart;
use crate::error::StorageError;
use crate::preferences::{Preferences, ThemeName, ViewMode};
use crate::storage::Storage;
use crate::theme::Theme;

const SAVE_FAILED: &str = "Could not save events. Storage might be full or unavailable.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Day,
    Form,
}

/// Per-day category marks for the month on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub summaries: BTreeMap<u32, Vec<String>>,
}

/// What the active view draws. Rebuilt after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Month(MonthGrid),
    Agenda(Vec<AgendaGroup>),
}

/// The entries popup for one date, sorted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPanel {
    pub date: String,
    pub events: Vec<Event>,
    pub cursor: usize,
}

impl DayPanel {
    pub fn selected(&self) -> Option<&Event> {
        self.events.get(self.cursor)
    }
}

pub struct App<S: Storage> {
    pub running: bool,
    pub input_mode: InputMode,
    pub navigation_date: NaiveDate,
    pub today: NaiveDate,
    pub view_mode: ViewMode,
    pub theme_name: ThemeName,
    pub theme: Theme,
    pub week_start: WeekStart,
    pub search_term: String,
    pub projection: Projection,
    pub day_panel: Option<DayPanel>,
    pub form_state: Option<EventFormState>,
    pub agenda_cursor: usize,
    pub status_message: Option<String>,
    pub show_help: bool,
    store: EventStore,
    storage: S,
}

impl<S: Storage> App<S> {
    pub fn new(storage: S, week_start: WeekStart) -> Self {
        let store = EventStore::load(&storage);
        let prefs = Preferences::load(&storage);
        let today = Local::now().date_naive();

        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            navigation_date: today,
            today,
            view_mode: prefs.view,
            theme_name: prefs.theme,
            theme: Theme::preset(prefs.theme),
            week_start,
            search_term: String::new(),
            projection: Projection::Agenda(Vec::new()),
            day_panel: None,
            form_state: None,
            agenda_cursor: 0,
            status_message: None,
            show_help: false,
            store,
            storage,
        };
        app.reproject();
        app
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn dispatch(&mut self, command: Command) {
        log::trace!("dispatch {command:?}");
        match command {
            Command::ChangeMonth(delta) => self.change_month(delta),
            Command::MoveDays(delta) => self.move_days(delta),
            Command::GoToToday => self.go_to_today(),
            Command::SetViewMode(mode) => self.set_view_mode(mode),
            Command::SetSearchTerm(term) => self.set_search_term(term),
            Command::ClearSearch => self.clear_search(),
            Command::SetTheme(name) => self.set_theme(name),
            Command::OpenDay(date) => self.open_day(&date),
            Command::CloseDay => self.close_day(),
            Command::AddEvent { date, event } => {
                // Rejections are already reported in the status bar.
                let _ = self.add_event(&date, event);
            }
            Command::DeleteEvent { date, id } => {
                self.delete_event(&date, id);
            }
            Command::Quit => self.running = false,
        }
    }

    /// Shift the navigation date by whole months. The day of month is
    /// clamped to the length of the target month.
    pub fn change_month(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.navigation_date.checked_add_months(months)
        } else {
            self.navigation_date.checked_sub_months(months)
        };
        if let Some(date) = moved {
            self.navigation_date = date;
        }
        self.reproject();
    }

    pub fn move_days(&mut self, delta: i64) {
        let days = Days::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.navigation_date.checked_add_days(days)
        } else {
            self.navigation_date.checked_sub_days(days)
        };
        if let Some(date) = moved {
            self.navigation_date = date;
        }
        self.reproject();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.navigation_date = self.today;
        self.reproject();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        if Preferences::save_view(&self.storage, mode).is_err() {
            self.status_message = Some("Could not save view preference".to_string());
        }
        self.reproject();
    }

    /// The month grid ignores the search term, so only the agenda is rebuilt.
    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        if self.view_mode == ViewMode::Agenda {
            self.reproject();
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    pub fn set_theme(&mut self, name: ThemeName) {
        self.theme_name = name;
        self.theme = Theme::preset(name);
        if Preferences::save_theme(&self.storage, name).is_err() {
            self.status_message = Some("Could not save theme preference".to_string());
        }
        self.reproject();
    }

    pub fn open_day(&mut self, date: &str) {
        match date_key::decode(date) {
            Ok(day) => {
                self.navigation_date = day;
                self.day_panel = Some(DayPanel {
                    date: date_key::encode(day),
                    events: Vec::new(),
                    cursor: 0,
                });
                self.input_mode = InputMode::Day;
            }
            Err(e) => {
                log::warn!("cannot open day: {e}");
                self.status_message = Some(e.to_string());
            }
        }
        self.reproject();
    }

    pub fn close_day(&mut self) {
        self.day_panel = None;
        self.form_state = None;
        self.input_mode = InputMode::Normal;
        self.reproject();
    }

    /// Add an entry. On a validation error nothing changes and the reason is
    /// shown; a failed write is reported but the entry stays. An open form
    /// for the same date is closed on success.
    pub fn add_event(&mut self, date: &str, event: NewEvent) -> Option<Event> {
        match self.store.add(&self.storage, date, event) {
            Ok(added) => {
                self.report_write(added.write_error, "Entry added");
                if self.form_state.as_ref().is_some_and(|f| f.date == date) {
                    self.close_event_form();
                }
                self.reproject();
                Some(added.value)
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
                None
            }
        }
    }

    pub fn delete_event(&mut self, date: &str, id: i64) -> bool {
        let deleted = self.store.delete(&self.storage, date, id);
        if deleted.value {
            self.report_write(deleted.write_error, "Entry deleted");
        } else {
            self.status_message = Some("Entry not found".to_string());
        }
        self.reproject();
        deleted.value
    }

    /// Recompute whatever the active view and the open day panel display.
    pub fn reproject(&mut self) {
        self.projection = match self.view_mode {
            ViewMode::Calendar => {
                let year = self.navigation_date.year();
                let month = self.navigation_date.month();
                Projection::Month(MonthGrid {
                    year,
                    month,
                    summaries: query::month_summaries(&self.store, year, month),
                })
            }
            ViewMode::Agenda => Projection::Agenda(query::agenda(&self.store, &self.search_term)),
        };

        let total = self.agenda_len();
        self.agenda_cursor = self.agenda_cursor.min(total.saturating_sub(1));

        if let Some(panel) = self.day_panel.as_mut() {
            let mut events = self.store.events_on(&panel.date).to_vec();
            query::sort_day(&mut events);
            panel.cursor = panel.cursor.min(events.len().saturating_sub(1));
            panel.events = events;
        }
    }

    pub fn selected_date_key(&self) -> String {
        date_key::encode(self.navigation_date)
    }

    pub fn selected_day_events(&self) -> Vec<Event> {
        let mut events = self.store.events_on(&self.selected_date_key()).to_vec();
        query::sort_day(&mut events);
        events
    }

    pub fn agenda_len(&self) -> usize {
        match &self.projection {
            Projection::Agenda(groups) => groups.iter().map(|g| g.events.len()).sum(),
            Projection::Month(_) => 0,
        }
    }

    /// The agenda entry under the cursor, with its date key.
    pub fn selected_agenda_entry(&self) -> Option<(&str, &Event)> {
        let Projection::Agenda(groups) = &self.projection else {
            return None;
        };
        groups
            .iter()
            .flat_map(|g| g.events.iter().map(move |e| (g.date.as_str(), e)))
            .nth(self.agenda_cursor)
    }

    pub fn move_agenda_cursor(&mut self, delta: isize) {
        let total = self.agenda_len();
        if total == 0 {
            self.agenda_cursor = 0;
            return;
        }
        self.agenda_cursor = self
            .agenda_cursor
            .saturating_add_signed(delta)
            .min(total - 1);
    }

    pub fn move_day_cursor(&mut self, delta: isize) {
        if let Some(panel) = self.day_panel.as_mut() {
            let last = panel.events.len().saturating_sub(1);
            panel.cursor = panel.cursor.saturating_add_signed(delta).min(last);
        }
    }

    pub fn open_event_form(&mut self) {
        let date = match &self.day_panel {
            Some(panel) => panel.date.clone(),
            None => self.selected_date_key(),
        };
        self.form_state = Some(EventFormState::new(date));
        self.input_mode = InputMode::Form;
    }

    pub fn close_event_form(&mut self) {
        self.form_state = None;
        self.input_mode = if self.day_panel.is_some() {
            InputMode::Day
        } else {
            InputMode::Normal
        };
    }

    /// Save the form. A saved entry closes it; a rejected one leaves it open
    /// with its contents.
    pub fn submit_event_form(&mut self) {
        let Some(form) = self.form_state.as_ref() else {
            return;
        };
        let command = Command::AddEvent {
            date: form.date.clone(),
            event: form.to_new_event(),
        };
        self.dispatch(command);
    }

    fn report_write(&mut self, write_error: Option<StorageError>, success: &str) {
        self.status_message = Some(match write_error {
            Some(_) => SAVE_FAILED.to_string(),
            None => success.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Category;
    use crate::storage::{MemoryStorage, EVENTS_KEY, THEME_KEY, VIEW_KEY};

    fn app() -> App<MemoryStorage> {
        App::new(MemoryStorage::new(), WeekStart::Sunday)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_on_today_with_stored_preferences() {
        let storage = MemoryStorage::with_entry(VIEW_KEY, "agenda");
        let app = App::new(storage, WeekStart::Sunday);
        assert_eq!(app.navigation_date, Local::now().date_naive());
        assert_eq!(app.view_mode, ViewMode::Agenda);
        assert_eq!(app.theme_name, ThemeName::Dark);
        assert!(matches!(app.projection, Projection::Agenda(_)));
    }

    #[test]
    fn change_month_clamps_day_and_rebuilds_grid() {
        let mut app = app();
        app.navigation_date = date(2024, 1, 31);

        app.dispatch(Command::ChangeMonth(1));
        assert_eq!(app.navigation_date, date(2024, 2, 29));
        match &app.projection {
            Projection::Month(grid) => assert_eq!((grid.year, grid.month), (2024, 2)),
            other => panic!("expected month grid, got {other:?}"),
        }

        app.dispatch(Command::ChangeMonth(-2));
        assert_eq!(app.navigation_date, date(2023, 12, 29));

        app.dispatch(Command::ChangeMonth(12));
        assert_eq!(app.navigation_date, date(2024, 12, 29));
    }

    #[test]
    fn go_to_today_resets_navigation() {
        let mut app = app();
        app.navigation_date = date(1999, 5, 5);
        app.dispatch(Command::GoToToday);
        assert_eq!(app.navigation_date, Local::now().date_naive());
    }

    #[test]
    fn view_mode_is_persisted_and_reprojected() {
        let storage = MemoryStorage::new();
        let mut app = App::new(storage.clone(), WeekStart::Sunday);

        app.dispatch(Command::SetViewMode(ViewMode::Agenda));
        assert_eq!(storage.raw(VIEW_KEY).as_deref(), Some("agenda"));
        assert!(matches!(app.projection, Projection::Agenda(_)));

        app.dispatch(Command::SetViewMode(ViewMode::Calendar));
        assert!(matches!(app.projection, Projection::Month(_)));
    }

    #[test]
    fn theme_is_persisted() {
        let storage = MemoryStorage::new();
        let mut app = App::new(storage.clone(), WeekStart::Sunday);
        app.dispatch(Command::SetTheme(ThemeName::Light));
        assert_eq!(storage.raw(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(app.theme_name, ThemeName::Light);
    }

    #[test]
    fn theme_and_close_day_leave_the_agenda_cursor_in_range() {
        let mut app = app();
        app.dispatch(Command::SetViewMode(ViewMode::Agenda));
        app.add_event("2024-06-01", NewEvent::new("only", Category::Work));

        app.agenda_cursor = 5;
        app.dispatch(Command::SetTheme(ThemeName::Synthwave));
        assert_eq!(app.agenda_cursor, 0);

        app.agenda_cursor = 5;
        app.dispatch(Command::CloseDay);
        assert_eq!(app.agenda_cursor, 0);
    }

    #[test]
    fn adding_an_event_updates_the_month_grid() {
        let mut app = app();
        app.navigation_date = date(2024, 7, 1);
        app.reproject();

        app.dispatch(Command::AddEvent {
            date: "2024-07-04".to_string(),
            event: NewEvent::new("Dentist", Category::Health).at("14:30"),
        });

        let Projection::Month(grid) = &app.projection else {
            panic!("expected month grid");
        };
        assert_eq!(grid.summaries.get(&4), Some(&vec!["health".to_string()]));
        assert_eq!(app.store().events_on("2024-07-04").len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Entry added"));
    }

    #[test]
    fn search_only_reprojects_the_agenda() {
        let mut app = app();
        app.add_event("2024-06-01", NewEvent::new("Pay rent", Category::Finance));
        app.add_event("2024-06-02", NewEvent::new("Gym", Category::Health));

        app.dispatch(Command::SetSearchTerm("rent".to_string()));
        assert!(matches!(app.projection, Projection::Month(_)));

        app.dispatch(Command::SetViewMode(ViewMode::Agenda));
        assert_eq!(app.agenda_len(), 1);

        app.dispatch(Command::SetSearchTerm("xyz".to_string()));
        assert_eq!(app.agenda_len(), 0);

        app.dispatch(Command::ClearSearch);
        assert_eq!(app.agenda_len(), 2);
        assert!(app.search_term.is_empty());
    }

    #[test]
    fn deleting_from_the_agenda_uses_the_cursor_entry() {
        let mut app = app();
        app.dispatch(Command::SetViewMode(ViewMode::Agenda));
        app.add_event("2024-06-01", NewEvent::new("first", Category::Work).at("08:00"));
        app.add_event("2024-06-01", NewEvent::new("second", Category::Work).at("09:00"));

        app.move_agenda_cursor(1);
        let (date, id) = {
            let (date, event) = app.selected_agenda_entry().expect("entry");
            assert_eq!(event.text, "second");
            (date.to_string(), event.id)
        };

        app.dispatch(Command::DeleteEvent { date, id });
        assert_eq!(app.agenda_len(), 1);
        assert_eq!(app.agenda_cursor, 0);
        assert_eq!(app.selected_agenda_entry().map(|(_, e)| e.text.as_str()), Some("first"));
    }

    #[test]
    fn deleting_the_last_entry_removes_the_day() {
        let mut app = app();
        let event = app
            .add_event("2024-06-01", NewEvent::new("only", Category::Other))
            .expect("added");
        assert!(app.delete_event("2024-06-01", event.id));
        assert!(!app.store().contains_date("2024-06-01"));
        assert!(!app.delete_event("2024-06-01", event.id));
        assert_eq!(app.status_message.as_deref(), Some("Entry not found"));
    }

    #[test]
    fn day_panel_tracks_store_changes_in_sorted_order() {
        let mut app = app();
        app.dispatch(Command::OpenDay("2024-06-01".to_string()));
        assert_eq!(app.input_mode, InputMode::Day);
        assert_eq!(app.navigation_date, date(2024, 6, 1));

        app.add_event("2024-06-01", NewEvent::new("late", Category::Work).at("18:00"));
        app.add_event("2024-06-01", NewEvent::new("holiday", Category::Personal).all_day());

        let panel = app.day_panel.as_ref().expect("panel open");
        let texts: Vec<&str> = panel.events.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["holiday", "late"]);

        app.dispatch(Command::CloseDay);
        assert!(app.day_panel.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn opening_a_loose_date_key_shows_the_padded_day() {
        let mut app = app();
        app.add_event("2024-06-01", NewEvent::new("rent", Category::Finance));
        app.dispatch(Command::OpenDay("2024-6-1".to_string()));

        let panel = app.day_panel.as_ref().expect("panel open");
        assert_eq!(panel.date, "2024-06-01");
        assert_eq!(panel.events.len(), 1);
    }

    #[test]
    fn opening_a_malformed_day_reports_instead_of_opening() {
        let mut app = app();
        app.dispatch(Command::OpenDay("not-a-date".to_string()));
        assert!(app.day_panel.is_none());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn rejected_form_stays_open() {
        let mut app = app();
        app.dispatch(Command::OpenDay("2024-06-01".to_string()));
        app.open_event_form();
        app.form_state.as_mut().unwrap().text = "   ".to_string();

        app.submit_event_form();
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.status_message.as_deref(), Some("Please enter event details"));
        assert!(app.store().is_empty());

        app.form_state.as_mut().unwrap().text = "Lunch".to_string();
        app.submit_event_form();
        assert_eq!(app.input_mode, InputMode::Day);
        assert_eq!(app.day_panel.as_ref().unwrap().events.len(), 1);
    }

    #[test]
    fn failed_save_is_reported_and_state_kept() {
        let storage = MemoryStorage::new();
        let mut app = App::new(storage.clone(), WeekStart::Sunday);
        storage.fail_writes(true);

        let added = app.add_event("2024-06-01", NewEvent::new("kept", Category::Work));
        assert!(added.is_some());
        assert_eq!(app.status_message.as_deref(), Some(SAVE_FAILED));
        assert_eq!(app.store().len(), 1);
        assert!(storage.raw(EVENTS_KEY).is_none());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app();
        app.dispatch(Command::Quit);
        assert!(!app.running);
    }
}
