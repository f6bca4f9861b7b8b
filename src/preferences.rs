use crate::error::StorageResult;
use crate::storage::{Storage, THEME_KEY, VIEW_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    Light,
    #[default]
    Dark,
    Synthwave,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Light, ThemeName::Dark, ThemeName::Synthwave];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::Synthwave => "synthwave",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value.trim())
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Synthwave,
            ThemeName::Synthwave => ThemeName::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Calendar,
    Agenda,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Calendar => "calendar",
            ViewMode::Agenda => "agenda",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "calendar" => Some(ViewMode::Calendar),
            "agenda" => Some(ViewMode::Agenda),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Calendar => ViewMode::Agenda,
            ViewMode::Agenda => ViewMode::Calendar,
        }
    }
}

/// Persisted scalar settings. Loading never fails: anything missing,
/// unreadable or unrecognized falls back to the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemeName,
    pub view: ViewMode,
}

impl Preferences {
    pub fn load(storage: &impl Storage) -> Self {
        Self {
            theme: load_value(storage, THEME_KEY, ThemeName::parse),
            view: load_value(storage, VIEW_KEY, ViewMode::parse),
        }
    }

    pub fn save_theme(storage: &impl Storage, theme: ThemeName) -> StorageResult<()> {
        storage.set(THEME_KEY, theme.as_str()).inspect_err(|e| {
            log::error!("could not save theme preference: {e}");
        })
    }

    pub fn save_view(storage: &impl Storage, view: ViewMode) -> StorageResult<()> {
        storage.set(VIEW_KEY, view.as_str()).inspect_err(|e| {
            log::error!("could not save view preference: {e}");
        })
    }
}

fn load_value<T: Default>(storage: &impl Storage, key: &str, parse: fn(&str) -> Option<T>) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
            log::debug!("ignoring unknown {key} preference '{raw}'");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("could not read {key} preference: {e}");
            T::default()
        }
    }
}
