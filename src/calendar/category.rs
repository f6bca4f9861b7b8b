/// The fixed set of entry categories. Events store the category key as a
/// plain string; anything unrecognized resolves to [`Category::Other`] when
/// it is looked up for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Finance,
    Health,
    Reminder,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Work,
        Category::Finance,
        Category::Health,
        Category::Reminder,
        Category::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Finance => "finance",
            Category::Health => "health",
            Category::Reminder => "reminder",
            Category::Other => "other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Finance => "Finance",
            Category::Health => "Health",
            Category::Reminder => "Reminder",
            Category::Other => "Other",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .unwrap_or(Category::Other)
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
