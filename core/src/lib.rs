// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of eventdesk: event records, the schedule editor model and the
//! document store behind them.

mod config;
mod desk;
mod event;
mod repo;
pub mod schedule;

pub use crate::config::{APP_NAME, Config};
pub use crate::desk::Desk;
pub use crate::event::{
    Category, EventDraft, EventRecord, EventShort, EventStatus, EventType, title_case,
};
pub use crate::repo::{EventRepository, JsonRepository, RepoError};
