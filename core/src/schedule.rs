// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The reorderable schedule editor embedded in the event form.

mod date_range;
mod dialog;
mod list;
mod store;
mod sync;
mod types;

pub use date_range::{
    DateRangeError, format_range, format_timestamp, parse_epoch_millis, to_epoch_millis,
};
pub use dialog::{DateField, DialogMode, FieldChange, ScheduleEditorDialog, TextField};
pub use list::{INVALID_RANGE, ScheduleListController, ScheduleRow};
pub use store::{ScheduleChange, ScheduleStore, SubscriptionId};
pub use sync::ParentFormSync;
pub use types::{DayEntry, ScheduleId, ScheduleItem};
