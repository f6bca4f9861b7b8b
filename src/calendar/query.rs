//! Projections of the event store for the two views: a filtered, sorted,
//! date-grouped agenda and per-day category summaries for the month grid.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::date_key;
use super::event::Event;
use super::store::EventStore;

/// Indicator marks shown per day in the month grid.
pub const MAX_DAY_INDICATORS: usize = 5;

/// Sort key for a timed entry with no time: after every real time that day.
const NO_TIME_SORT_KEY: &str = "24:00";

/// An event tagged with the date key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub date: String,
    pub event: Event,
}

/// A run of agenda entries sharing one date, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaGroup {
    pub date: String,
    pub events: Vec<Event>,
}

impl AgendaGroup {
    pub fn day(&self) -> Option<NaiveDate> {
        date_key::decode(&self.date).ok()
    }
}

pub fn flatten(store: &EventStore) -> Vec<AgendaEntry> {
    store
        .days()
        .flat_map(|(date, events)| {
            events.iter().map(move |event| AgendaEntry {
                date: date.to_string(),
                event: event.clone(),
            })
        })
        .collect()
}

/// Keep entries whose text or category name contains `term`, ignoring case.
/// An empty term keeps everything.
pub fn filter(entries: Vec<AgendaEntry>, term: &str) -> Vec<AgendaEntry> {
    if term.is_empty() {
        return entries;
    }
    let needle = term.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| {
            entry.event.text.to_lowercase().contains(&needle)
                || entry.event.category().name().to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn sort_for_agenda(mut entries: Vec<AgendaEntry>) -> Vec<AgendaEntry> {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| compare_within_day(&a.event, &b.event))
    });
    entries
}

/// Order one day's entries the way the agenda orders them within a date.
pub fn sort_day(events: &mut [Event]) {
    events.sort_by(compare_within_day);
}

// All-day first (ties equal, so the stable sort keeps their order), then
// timed entries by HH:MM with a missing time last.
fn compare_within_day(a: &Event, b: &Event) -> Ordering {
    match (a.is_all_day, b.is_all_day) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => time_sort_key(a).cmp(time_sort_key(b)),
    }
}

fn time_sort_key(event: &Event) -> &str {
    if event.time.is_empty() {
        NO_TIME_SORT_KEY
    } else {
        &event.time
    }
}

/// Split a date-sorted sequence into contiguous same-date groups.
pub fn group_by_date(sorted: Vec<AgendaEntry>) -> Vec<AgendaGroup> {
    let mut groups: Vec<AgendaGroup> = Vec::new();
    for AgendaEntry { date, event } in sorted {
        match groups.last_mut() {
            Some(group) if group.date == date => group.events.push(event),
            _ => groups.push(AgendaGroup {
                date,
                events: vec![event],
            }),
        }
    }
    groups
}

/// The full agenda pipeline: flatten, filter, sort, group.
pub fn agenda(store: &EventStore, term: &str) -> Vec<AgendaGroup> {
    group_by_date(sort_for_agenda(filter(flatten(store), term)))
}

/// Distinct category keys in first-seen order, capped at
/// [`MAX_DAY_INDICATORS`].
pub fn summarize_day(events: &[Event]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for event in events {
        if keys.len() == MAX_DAY_INDICATORS {
            break;
        }
        if !keys.contains(&event.category) {
            keys.push(event.category.clone());
        }
    }
    keys
}

/// Day-of-month -> indicator categories for every day in the month that has
/// entries.
pub fn month_summaries(store: &EventStore, year: i32, month: u32) -> BTreeMap<u32, Vec<String>> {
    let prefix = format!("{year:04}-{month:02}-");
    store
        .days()
        .filter(|(date, _)| date.starts_with(&prefix))
        .filter_map(|(date, events)| {
            let day = date_key::decode(date).ok()?;
            Some((day.day(), summarize_day(events)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Category, NewEvent};
    use crate::storage::MemoryStorage;

    fn event(id: i64, text: &str, category: &str, time: &str, all_day: bool) -> Event {
        Event {
            id,
            text: text.to_string(),
            category: category.to_string(),
            time: time.to_string(),
            is_all_day: all_day,
        }
    }

    fn entry(date: &str, event: Event) -> AgendaEntry {
        AgendaEntry {
            date: date.to_string(),
            event,
        }
    }

    fn rent_store() -> EventStore {
        EventStore::from_json(
            r#"{"2024-06-01":[{"id":1,"text":"Pay rent","category":"finance","time":"","isAllDay":false}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn flatten_tags_each_event_with_its_date() {
        let store = EventStore::from_json(
            r#"{"2024-06-02":[{"id":2,"text":"b","category":"work","time":"","isAllDay":false}],
                "2024-06-01":[{"id":1,"text":"a","category":"work","time":"","isAllDay":false},
                              {"id":3,"text":"c","category":"work","time":"","isAllDay":false}]}"#,
        )
        .unwrap();

        let flat = flatten(&store);
        let tags: Vec<(&str, i64)> = flat.iter().map(|e| (e.date.as_str(), e.event.id)).collect();
        assert_eq!(tags, [("2024-06-01", 1), ("2024-06-01", 3), ("2024-06-02", 2)]);
    }

    #[test]
    fn empty_filter_is_identity() {
        let entries = flatten(&rent_store());
        assert_eq!(filter(entries.clone(), ""), entries);
    }

    #[test]
    fn search_matches_text_case_insensitively() {
        let store = rent_store();
        let found = filter(flatten(&store), "RENT");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].event.text, "Pay rent");
        assert!(filter(flatten(&store), "xyz").is_empty());
    }

    #[test]
    fn search_matches_category_display_name() {
        let entries = vec![
            entry("2024-06-01", event(1, "Checkup", "health", "", false)),
            entry("2024-06-01", event(2, "Taxes", "finance", "", false)),
            entry("2024-06-01", event(3, "Mystery", "unknown", "", false)),
        ];
        let ids = |v: Vec<AgendaEntry>| v.into_iter().map(|e| e.event.id).collect::<Vec<_>>();
        assert_eq!(ids(filter(entries.clone(), "heal")), [1]);
        assert_eq!(ids(filter(entries, "other")), [3]);
    }

    #[test]
    fn all_day_sorts_before_timed_and_times_ascend() {
        let sorted = sort_for_agenda(vec![
            entry("2024-06-01", event(1, "all day", "work", "", true)),
            entry("2024-06-01", event(2, "nine", "work", "09:00", false)),
            entry("2024-06-01", event(3, "eight", "work", "08:00", false)),
        ]);
        let ids: Vec<i64> = sorted.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, [1, 3, 2]);
    }

    #[test]
    fn dates_dominate_and_untimed_entries_sort_last() {
        let sorted = sort_for_agenda(vec![
            entry("2024-06-02", event(1, "tomorrow", "work", "07:00", false)),
            entry("2024-06-01", event(2, "whenever", "work", "", false)),
            entry("2024-06-01", event(3, "late", "work", "23:59", false)),
            entry("2024-06-01", event(4, "holiday", "work", "", true)),
            entry("2024-06-01", event(5, "also all day", "work", "", true)),
        ]);
        let ids: Vec<i64> = sorted.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, [4, 5, 3, 2, 1]);
    }

    #[test]
    fn grouping_keeps_within_date_order() {
        let groups = group_by_date(vec![
            entry("2024-06-01", event(1, "a", "work", "", true)),
            entry("2024-06-01", event(2, "b", "work", "08:00", false)),
            entry("2024-06-03", event(3, "c", "work", "", false)),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2024-06-01");
        assert_eq!(groups[0].events.iter().map(|e| e.id).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(groups[1].day(), NaiveDate::from_ymd_opt(2024, 6, 3));
        assert!(group_by_date(Vec::new()).is_empty());
    }

    #[test]
    fn summary_is_first_seen_distinct_and_capped() {
        let categories = ["work", "work", "health", "finance", "personal", "reminder", "other"];
        let events: Vec<Event> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| event(i as i64, "x", c, "", false))
            .collect();

        let summary = summarize_day(&events);
        assert_eq!(summary, ["work", "health", "finance", "personal", "reminder"]);
        assert_eq!(summary.len(), MAX_DAY_INDICATORS);
    }

    #[test]
    fn sort_day_matches_agenda_order() {
        let mut events = vec![
            event(1, "none", "work", "", false),
            event(2, "noon", "work", "12:00", false),
            event(3, "all", "work", "", true),
        ];
        sort_day(&mut events);
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn month_summaries_only_cover_the_requested_month() {
        let storage = MemoryStorage::new();
        let mut store = EventStore::new();
        for (date, category) in [
            ("2024-06-01", Category::Work),
            ("2024-06-01", Category::Health),
            ("2024-06-30", Category::Finance),
            ("2024-07-01", Category::Work),
        ] {
            store
                .add(&storage, date, NewEvent::new("x", category))
                .unwrap();
        }

        let summaries = month_summaries(&store, 2024, 6);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[&1], ["work", "health"]);
        assert_eq!(summaries[&30], ["finance"]);
    }

    #[test]
    fn agenda_pipeline_filters_then_groups() {
        let groups = agenda(&rent_store(), "rent");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].events[0].text, "Pay rent");
        assert!(agenda(&rent_store(), "dentist").is_empty());
    }
}
