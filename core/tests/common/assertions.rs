// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::collections::HashSet;
use std::path::Path;

use eventdesk_core::schedule::ScheduleStore;

/// Asserts that a file exists at the given path.
#[track_caller]
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "expected file at {}", path.display());
}

/// Asserts that no two schedule items share an id.
#[track_caller]
pub fn assert_unique_ids(store: &ScheduleStore) {
    let ids: HashSet<_> = store.items().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids.len(), store.len(), "duplicate ids: {:?}", store.items());
}
