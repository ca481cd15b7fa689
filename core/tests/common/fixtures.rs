// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use eventdesk_core::schedule::DayEntry;
use eventdesk_core::{Config, EventRecord};

/// Creates a test configuration storing documents under `data_dir`, with
/// dates displayed in UTC.
#[must_use]
pub fn test_config(data_dir: &Path) -> Config {
    Config {
        data_dir: Some(data_dir.to_owned()),
        timezone: Some("UTC".to_string()),
        ..Config::default()
    }
}

/// Creates a blank event with the given name.
#[must_use]
pub fn test_event(name: &str) -> EventRecord {
    let mut record = EventRecord::default_draft();
    record.name = name.to_string();
    record.description_short = format!("{name} in short");
    record
}

/// Creates a day entry with the given name and epoch-millisecond range.
#[must_use]
pub fn day_entry(name: &str, start: &str, end: &str) -> DayEntry {
    DayEntry {
        name: name.to_string(),
        description: format!("About {name}"),
        start: start.to_string(),
        end: end.to_string(),
        display: true,
    }
}
