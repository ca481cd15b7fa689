// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// One slot of an event schedule.
///
/// `start` and `end` hold epoch milliseconds as strings, exactly as they are
/// persisted. They are opaque here: `start <= end` is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayEntry {
    /// Display name of the day, e.g. "Day 1".
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Start instant in epoch milliseconds.
    #[serde(rename = "start_date")]
    pub start: String,

    /// End instant in epoch milliseconds.
    #[serde(rename = "end_date")]
    pub end: String,

    /// Whether the day is shown publicly.
    pub display: bool,
}

impl DayEntry {
    /// A blank entry, as used by the editor in create mode.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start: String::new(),
            end: String::new(),
            display: true,
        }
    }
}

impl Default for DayEntry {
    fn default() -> Self {
        Self::blank()
    }
}

/// Stable, list-local identifier of a schedule item. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(String);

impl ScheduleId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ScheduleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ScheduleId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u64> for ScheduleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A day entry paired with its list-local identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    pub id: ScheduleId,
    pub item: DayEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_entry_is_displayed() {
        let entry = DayEntry::blank();
        assert!(entry.display);
        assert!(entry.name.is_empty());
        assert!(entry.start.is_empty());
        assert_eq!(entry, DayEntry::default());
    }

    #[test]
    fn day_entry_uses_persisted_field_names() {
        let entry = DayEntry {
            name: "Day 1".to_string(),
            description: "Opening".to_string(),
            start: "1700000000000".to_string(),
            end: "1700003600000".to_string(),
            display: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["start_date"], "1700000000000");
        assert_eq!(json["end_date"], "1700003600000");
        assert!(json.get("id").is_none());
        assert!(json.get("start").is_none());

        let back: DayEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
