pub mod agenda_view;
pub mod day_view;
pub mod event_form;
pub mod help;
pub mod month_view;
pub mod search_bar;
pub mod status_bar;

pub use agenda_view::AgendaView;
pub use day_view::DayView;
pub use event_form::EventForm;
pub use month_view::MonthView;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
