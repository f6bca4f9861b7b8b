use crate::calendar::NewEvent;
use crate::preferences::{ThemeName, ViewMode};

/// Every state change the UI can ask for. Key handling only builds these;
/// [`crate::app::App::dispatch`] applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ChangeMonth(i32),
    MoveDays(i64),
    GoToToday,
    SetViewMode(ViewMode),
    SetSearchTerm(String),
    ClearSearch,
    SetTheme(ThemeName),
    OpenDay(String),
    CloseDay,
    AddEvent { date: String, event: NewEvent },
    DeleteEvent { date: String, id: i64 },
    Quit,
}
