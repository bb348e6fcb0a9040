//! Identifier and enum types shared across the domain layer.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit.
///
/// Wrapper around UUID for type safety - a habit id cannot be passed
/// where a user id is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit id from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user id from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit recurs.
///
/// Daily habits apply to every date; weekly habits apply only to the
/// weekdays listed on the habit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
        }
    }
}

/// Whether a habit is something to build up or cut out.
///
/// Classification tag only - scheduling never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Good,
    Bad,
}

impl Behavior {
    pub fn display_name(&self) -> &'static str {
        match self {
            Behavior::Good => "Good",
            Behavior::Bad => "Bad",
        }
    }
}

/// Time-of-day slot a habit belongs to.
///
/// Used for display ordering only; due-date logic never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeRange {
    /// Fixed sort rank, morning first.
    pub fn rank(&self) -> u8 {
        match self {
            TimeRange::Morning => 1,
            TimeRange::Afternoon => 2,
            TimeRange::Evening => 3,
            TimeRange::Night => 4,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeRange::Morning => "Morning",
            TimeRange::Afternoon => "Afternoon",
            TimeRange::Evening => "Evening",
            TimeRange::Night => "Night",
        }
    }
}

/// Full English weekday name, the form the persisted `weekDay` array uses.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Serde adapter for weekday lists: full day names on the wire.
pub mod weekday_names {
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::weekday_name;

    pub fn serialize<S>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(weekday_name(*day))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| D::Error::custom(format!("unrecognized weekday name: {name}")))
            })
            .collect()
    }
}
