// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the eventdesk-core crate.
//!
//! These tests drive the schedule editor the way the event form does and
//! check what ends up in the document store.

mod event_lifecycle;
mod schedule_editing;
