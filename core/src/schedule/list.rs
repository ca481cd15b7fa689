// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;

use crate::schedule::date_range::format_range;
use crate::schedule::{ScheduleEditorDialog, ScheduleId, ScheduleItem, ScheduleStore};

/// Text shown in place of a date range that cannot be formatted.
pub const INVALID_RANGE: &str = "Invalid date";

/// One rendered line of the schedule list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduleRow {
    pub id: String,
    pub slot: usize,
    pub name: String,
    pub description: String,
    pub range: String,
}

/// Glue between list interactions and the schedule store.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleListController;

impl ScheduleListController {
    pub fn new() -> Self {
        Self
    }

    /// Rows in list order; slot numbers are 1-based positions.
    pub fn rows(&self, store: &ScheduleStore, tz: &TimeZone) -> Vec<ScheduleRow> {
        store
            .items()
            .iter()
            .enumerate()
            .map(|(i, a)| ScheduleRow {
                id: a.id.to_string(),
                slot: i + 1,
                name: a.item.name.clone(),
                description: a.item.description.clone(),
                range: match format_range(&a.item.start, &a.item.end, tz) {
                    Ok(range) => range,
                    Err(err) => {
                        tracing::warn!(id = %a.id, %err, "failed to format schedule range");
                        INVALID_RANGE.to_owned()
                    }
                },
            })
            .collect()
    }

    /// Opens the editor in create mode.
    pub fn add_day(&self) -> ScheduleEditorDialog {
        ScheduleEditorDialog::open(None)
    }

    /// Opens the editor seeded with the given item, if it exists.
    pub fn edit_day(&self, store: &ScheduleStore, id: &ScheduleId) -> Option<ScheduleEditorDialog> {
        store
            .get(id)
            .cloned()
            .map(|item| ScheduleEditorDialog::open(Some(item)))
    }

    pub fn delete_day(&self, store: &mut ScheduleStore, id: &ScheduleId) {
        store.remove(id);
    }

    /// Applies the final ordering reported by a drag gesture.
    pub fn on_reorder_complete(&self, store: &mut ScheduleStore, new_ordered_ids: &[ScheduleId]) {
        let items: Vec<ScheduleItem> = new_ordered_ids
            .iter()
            .filter_map(|id| {
                let item = store.get(id).cloned();
                if item.is_none() {
                    tracing::warn!(%id, "reorder referenced an unknown schedule id");
                }
                item
            })
            .collect();
        store.reorder(items);
    }

    /// Moves the item at `from` to `to`, like dropping a dragged row.
    pub fn move_day(&self, store: &mut ScheduleStore, from: usize, to: usize) {
        let len = store.len();
        if from == to || from >= len || to >= len {
            return;
        }

        let mut ids: Vec<ScheduleId> = store.items().iter().map(|a| a.id.clone()).collect();
        let id = ids.remove(from);
        ids.insert(to, id);
        self.on_reorder_complete(store, &ids);
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;
    use crate::schedule::{DayEntry, FieldChange, TextField};

    fn entry(name: &str, start: &str, end: &str) -> DayEntry {
        DayEntry {
            name: name.to_string(),
            description: format!("{name} description"),
            start: start.to_string(),
            end: end.to_string(),
            display: true,
        }
    }

    fn names(store: &ScheduleStore) -> Vec<&str> {
        store.items().iter().map(|a| a.item.name.as_str()).collect()
    }

    #[test]
    fn rows_number_slots_by_position() {
        let store = ScheduleStore::from_entries(vec![entry("a", "0", "0"), entry("b", "0", "0")]);
        let rows = ScheduleListController::new().rows(&store, &TimeZone::UTC);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].slot, 1);
        assert_eq!(rows[1].slot, 2);
        assert_eq!(rows[1].name, "b");
        assert_eq!(rows[0].range, "January 1, 1970 at 12:00 AM");
    }

    #[test]
    fn rows_mark_unreadable_ranges() {
        let store = ScheduleStore::from_entries(vec![entry("a", "", "")]);
        let rows = ScheduleListController::new().rows(&store, &TimeZone::UTC);
        assert_eq!(rows[0].range, INVALID_RANGE);
    }

    #[test]
    fn edit_unknown_id_opens_nothing() {
        let store = ScheduleStore::new();
        let ctrl = ScheduleListController::new();
        assert!(ctrl.edit_day(&store, &ScheduleId::from("0")).is_none());
    }

    #[test]
    fn delete_forwards_to_store() {
        let mut store = ScheduleStore::from_entries(vec![entry("a", "0", "0")]);
        ScheduleListController::new().delete_day(&mut store, &ScheduleId::from("0"));
        assert!(store.is_empty());
    }

    #[test]
    fn move_day_behaves_like_array_move() {
        let mut store = ScheduleStore::from_entries(vec![
            entry("a", "0", "0"),
            entry("b", "0", "0"),
            entry("c", "0", "0"),
        ]);
        let ctrl = ScheduleListController::new();

        ctrl.move_day(&mut store, 0, 2);
        assert_eq!(names(&store), ["b", "c", "a"]);

        ctrl.move_day(&mut store, 2, 0);
        assert_eq!(names(&store), ["a", "b", "c"]);

        ctrl.move_day(&mut store, 1, 5);
        assert_eq!(names(&store), ["a", "b", "c"]);
    }

    #[test]
    fn add_two_days_then_swap() {
        let mut store = ScheduleStore::new();
        let ctrl = ScheduleListController::new();

        let mut dialog = ctrl.add_day();
        dialog.apply(FieldChange::Text(TextField::Name, "Day 1".to_string()));
        dialog.apply(FieldChange::Date(
            crate::schedule::DateField::Start,
            jiff::Timestamp::from_millisecond(1_700_000_000_000).unwrap(),
        ));
        dialog.apply(FieldChange::Date(
            crate::schedule::DateField::End,
            jiff::Timestamp::from_millisecond(1_700_003_600_000).unwrap(),
        ));
        dialog.confirm(&mut store);
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id.as_str(), "0");

        let mut dialog = ctrl.add_day();
        dialog.apply(FieldChange::Text(TextField::Name, "Day 2".to_string()));
        dialog.confirm(&mut store);
        let ids: Vec<_> = store.items().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["0", "1"]);

        ctrl.on_reorder_complete(&mut store, &[ScheduleId::from("1"), ScheduleId::from("0")]);
        let rows = ctrl.rows(&store, &TimeZone::UTC);
        assert_eq!(rows[0].slot, 1);
        assert_eq!(rows[0].name, "Day 2");
        assert_eq!(rows[1].name, "Day 1");
        assert_eq!(rows[1].range, "November 14, 2023 at 10:13 - 11:13 PM");
    }
}
