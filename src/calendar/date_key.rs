//! Conversion between calendar days and their `YYYY-MM-DD` storage keys.
//!
//! Keys are built from the calendar fields of a [`NaiveDate`], never from an
//! instant, so a key cannot drift across midnight in any time zone.

use chrono::{Datelike, NaiveDate};

use crate::error::DateKeyError;

pub fn encode(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn decode(key: &str) -> Result<NaiveDate, DateKeyError> {
    let malformed = || DateKeyError::Malformed(key.to_string());

    let mut parts = key.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let year: i32 = y.trim().parse().map_err(|_| malformed())?;
    let month: u32 = m.trim().parse().map_err(|_| malformed())?;
    let day: u32 = d.trim().parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateKeyError::OutOfRange(key.to_string()))
}

/// Re-encode a decodable key in padded form, so `"2024-6-1"` and
/// `"2024-06-01"` name the same map entry.
pub fn canonicalize(key: &str) -> Result<String, DateKeyError> {
    decode(key).map(encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(encode(date), "2024-06-01");
    }

    #[test]
    fn round_trips_every_day_of_a_leap_year_and_its_edges() {
        let mut date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        while date <= end {
            assert_eq!(decode(&encode(date)), Ok(date));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn rejects_keys_without_three_numeric_parts() {
        for key in ["", "2024-06", "2024-06-01-02", "2024-jun-01", "garbage"] {
            assert!(
                matches!(decode(key), Err(DateKeyError::Malformed(_))),
                "{key} should be malformed"
            );
        }
    }

    #[test]
    fn canonicalize_pads_loose_keys() {
        assert_eq!(canonicalize("2024-6-1").as_deref(), Ok("2024-06-01"));
        assert_eq!(canonicalize("2024-06-01").as_deref(), Ok("2024-06-01"));
        assert!(canonicalize("2024-13-01").is_err());
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!(
            decode("2023-02-29"),
            Err(DateKeyError::OutOfRange("2023-02-29".to_string()))
        );
    }
}
