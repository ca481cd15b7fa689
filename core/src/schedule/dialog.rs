// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;

use crate::schedule::date_range::to_epoch_millis;
use crate::schedule::{DayEntry, ScheduleId, ScheduleItem, ScheduleStore};

/// Text fields of a day entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
}

/// Date fields of a day entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// A single edit coming from the dialog's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Text(TextField, String),
    Date(DateField, Timestamp),
    ClearDate(DateField),
    Display(bool),
}

/// Whether the dialog creates a new day or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit,
}

/// Editor for a single day entry.
///
/// The draft is local to the dialog; the store is only touched on
/// [`confirm`](Self::confirm).
#[derive(Debug, Clone)]
pub struct ScheduleEditorDialog {
    target: Option<ScheduleId>,
    draft: DayEntry,
}

impl ScheduleEditorDialog {
    pub fn open(existing: Option<ScheduleItem>) -> Self {
        match existing {
            Some(ScheduleItem { id, item }) => Self {
                target: Some(id),
                draft: item,
            },
            None => Self {
                target: None,
                draft: DayEntry::blank(),
            },
        }
    }

    pub fn mode(&self) -> DialogMode {
        match self.target {
            Some(_) => DialogMode::Edit,
            None => DialogMode::Create,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            DialogMode::Create => "Add a day",
            DialogMode::Edit => "Edit day",
        }
    }

    pub fn target(&self) -> Option<&ScheduleId> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &DayEntry {
        &self.draft
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.draft.name,
            TextField::Description => &self.draft.description,
        }
    }

    pub fn date(&self, field: DateField) -> &str {
        match field {
            DateField::Start => &self.draft.start,
            DateField::End => &self.draft.end,
        }
    }

    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Text(field, value) => match field {
                TextField::Name => self.draft.name = value,
                TextField::Description => self.draft.description = value,
            },
            FieldChange::Date(field, ts) => *self.date_mut(field) = to_epoch_millis(ts),
            FieldChange::ClearDate(field) => self.date_mut(field).clear(),
            FieldChange::Display(v) => self.draft.display = v,
        }
    }

    /// Writes the draft into the store and closes the dialog.
    pub fn confirm(self, store: &mut ScheduleStore) -> ScheduleId {
        tracing::debug!(target = ?self.target, "confirming schedule dialog");
        store.upsert(self.draft, self.target.as_ref())
    }

    /// Closes the dialog without touching the store.
    pub fn cancel(self) {
        tracing::debug!(target = ?self.target, "schedule dialog cancelled");
    }

    fn date_mut(&mut self, field: DateField) -> &mut String {
        match field {
            DateField::Start => &mut self.draft.start,
            DateField::End => &mut self.draft.end,
        }
    }
}
