// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::schedule::DayEntry;

/// Lifecycle status of an event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    /// The event has not started yet.
    #[default]
    Upcoming,

    /// The event is running.
    Ongoing,

    /// The event is over.
    Completed,

    /// The event was called off.
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    const fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Display label, e.g. "Upcoming".
    pub fn label(&self) -> String {
        label_of(self.as_str())
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Invalid event status: {s}"))
    }
}

/// How an event is attended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    #[default]
    Virtual,
    InPerson,
    Hybrid,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Virtual, EventType::InPerson, EventType::Hybrid];

    const fn as_str(&self) -> &'static str {
        match self {
            EventType::Virtual => "virtual",
            EventType::InPerson => "in-person",
            EventType::Hybrid => "hybrid",
        }
    }

    /// Display label, e.g. "In Person".
    pub fn label(&self) -> String {
        label_of(self.as_str())
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

impl Category {
    pub fn new(id: impl ToString, label: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// An event document as kept in the document store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub description_short: String,

    #[serde(rename = "imageURL", default)]
    pub image_url: String,

    /// Start instant in epoch milliseconds.
    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub status: EventStatus,

    #[serde(default)]
    pub category: Vec<Category>,

    #[serde(rename = "type", default)]
    pub kind: EventType,

    /// Ordered day entries. Replaced wholesale on save.
    #[serde(default)]
    pub schedule: Vec<DayEntry>,

    #[serde(rename = "displayShedule", default)]
    pub display_schedule: bool,

    /// Fields this tool does not edit (gallery, mentors, sponsors, ...),
    /// carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// A blank event, as offered when creating a new one.
    pub fn default_draft() -> Self {
        let mut extra = Map::new();
        for key in ["skills", "prerequisites", "mentors", "testimonials", "sponsors"] {
            extra.insert(key.to_owned(), Value::Object(Map::new()));
        }
        extra.insert("gallery".to_owned(), Value::Array(Vec::new()));

        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            description_short: String::new(),
            image_url: String::new(),
            start_date: String::new(),
            status: EventStatus::default(),
            category: Vec::new(),
            kind: EventType::default(),
            schedule: Vec::new(),
            display_schedule: false,
            extra,
        }
    }
}

/// The list projection of an event, kept in the events index.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventShort {
    pub id: String,
    pub name: String,

    #[serde(rename = "imageURL", default)]
    pub image_url: String,

    #[serde(default)]
    pub description_short: String,

    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub status: EventStatus,

    #[serde(default)]
    pub category: Vec<Category>,

    #[serde(rename = "type", default)]
    pub kind: EventType,
}

impl From<&EventRecord> for EventShort {
    fn from(event: &EventRecord) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            image_url: event.image_url.clone(),
            description_short: event.description_short.clone(),
            start_date: event.start_date.clone(),
            status: event.status,
            category: event.category.clone(),
            kind: event.kind,
        }
    }
}

/// The event edit form's working copy.
#[derive(Debug, Clone)]
pub struct EventDraft {
    record: EventRecord,
    is_new: bool,
}

impl EventDraft {
    pub fn new(record: EventRecord, is_new: bool) -> Self {
        Self { record, is_new }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut EventRecord {
        &mut self.record
    }

    pub fn schedule(&self) -> &[DayEntry] {
        &self.record.schedule
    }

    /// Replaces the schedule wholesale.
    pub fn set_schedule(&mut self, schedule: Vec<DayEntry>) {
        self.record.schedule = schedule;
    }

    pub fn into_record(self) -> EventRecord {
        self.record
    }
}

/// Capitalizes the first letter of every space separated word and lowercases the rest.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn label_of(value: &str) -> String {
    title_case(&value.replace('-', " "))
}
