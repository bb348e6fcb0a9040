//! Calendar-day keys and the per-habit completion history.
//!
//! A completion is recorded against a whole calendar day, never an
//! instant. [`DateKey`] is the canonical day form; [`CompletionHistory`]
//! is the set of days a habit was marked done.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Weekday};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::DomainError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical key for a single calendar day.
///
/// Two instants on the same calendar day collapse to the same key and
/// different days never collide. Time-of-day is discarded at
/// construction, so there is no normalization left to do afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Key for the calendar day of `moment` in that value's own timezone.
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        Self(moment.date_naive())
    }

    /// Today's key in local time.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Gregorian weekday of this day.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The key `days` calendar days earlier.
    pub fn days_before(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    /// Parse the canonical `%Y-%m-%d` form. Anything else is rejected
    /// rather than coerced to some valid-looking day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidDate(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Record of which calendar days a habit was marked done.
///
/// A present day IS the completed state; `false` is never stored, the
/// toggle removes the key instead. The wire shape is a JSON object
/// mapping date key to `true`, matching the persisted habit records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionHistory(BTreeSet<DateKey>);

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the completed state for one day and return the new state.
    ///
    /// Total over any day, and its own inverse: toggling twice restores
    /// the original history.
    pub fn toggle(&mut self, date: DateKey) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    pub fn contains(&self, date: DateKey) -> bool {
        self.0.contains(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Completed days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for CompletionHistory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for date in &self.0 {
            map.serialize_entry(&date.to_string(), &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompletionHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Tolerate explicit `false` entries in old payloads; absence and
        // false mean the same thing.
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut days = BTreeSet::new();
        for (key, done) in raw {
            if !done {
                continue;
            }
            days.insert(key.parse::<DateKey>().map_err(D::Error::custom)?);
        }
        Ok(Self(days))
    }
}
