use serde::{Deserialize, Serialize};

use super::category::Category;

/// One agenda entry as it is persisted under its date key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "isAllDay", default)]
    pub is_all_day: bool,
}

impl Event {
    pub fn category(&self) -> Category {
        Category::from_key(&self.category)
    }

    pub fn time_display(&self) -> &str {
        if self.is_all_day {
            "All Day"
        } else if self.time.is_empty() {
            "Any Time"
        } else {
            &self.time
        }
    }
}

/// Input for [`super::EventStore::add`]; id assignment and normalization
/// happen in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub text: String,
    pub category: String,
    pub time: String,
    pub is_all_day: bool,
}

#[cfg(test)]
impl NewEvent {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category: category.key().to_string(),
            ..Self::default()
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self.is_all_day = false;
        self
    }

    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_all_day_flag() {
        let json = r#"{"id":1717200000000,"text":"Pay rent","category":"finance","time":"","isAllDay":true}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_all_day);
        assert_eq!(event.category(), Category::Finance);
        assert_eq!(event.time_display(), "All Day");
    }

    #[test]
    fn missing_optional_fields_default() {
        let event: Event = serde_json::from_str(r#"{"id":5,"text":"x"}"#).unwrap();
        assert_eq!(event.category(), Category::Other);
        assert_eq!(event.time_display(), "Any Time");
    }
}
