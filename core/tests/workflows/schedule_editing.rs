// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule editing workflows across store, dialog, list and sync.

use std::cell::RefCell;
use std::rc::Rc;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use eventdesk_core::schedule::{
    DateField, DayEntry, FieldChange, ParentFormSync, ScheduleId, ScheduleListController,
    ScheduleStore, TextField,
};

use crate::common::{assert_unique_ids, day_entry};

fn ids(store: &ScheduleStore) -> Vec<String> {
    store.items().iter().map(|a| a.id.to_string()).collect()
}

#[test]
fn add_two_days_and_drag_to_swap() {
    let mut store = ScheduleStore::new();
    let list = ScheduleListController::new();
    let updates = Rc::new(RefCell::new(Vec::<Vec<DayEntry>>::new()));
    let sink = updates.clone();
    let mut sync = ParentFormSync::new(Vec::new(), move |s| sink.borrow_mut().push(s.to_vec()));
    sync.attach(&mut store);

    let mut dialog = list.add_day();
    dialog.apply(FieldChange::Text(TextField::Name, "Day 1".to_string()));
    dialog.apply(FieldChange::Date(
        DateField::Start,
        Timestamp::from_millisecond(1_700_000_000_000).unwrap(),
    ));
    dialog.apply(FieldChange::Date(
        DateField::End,
        Timestamp::from_millisecond(1_700_003_600_000).unwrap(),
    ));
    dialog.confirm(&mut store);
    sync.flush(&store);
    assert_eq!(ids(&store), ["0"]);
    assert_eq!(store.items()[0].item.start, "1700000000000");

    let mut dialog = list.add_day();
    dialog.apply(FieldChange::Text(TextField::Name, "Day 2".to_string()));
    dialog.confirm(&mut store);
    sync.flush(&store);
    assert_eq!(ids(&store), ["0", "1"]);

    list.on_reorder_complete(&mut store, &[ScheduleId::from("1"), ScheduleId::from("0")]);
    sync.flush(&store);

    let rows = list.rows(&store, &TimeZone::UTC);
    assert_eq!(rows[0].slot, 1);
    assert_eq!(rows[0].name, "Day 2");
    assert_eq!(rows[1].slot, 2);
    assert_eq!(rows[1].name, "Day 1");

    let updates = updates.borrow();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[2][0].name, "Day 2");
}

#[test]
fn editing_after_drag_keeps_dragged_order() {
    let mut store = ScheduleStore::from_entries(vec![
        day_entry("a", "0", "0"),
        day_entry("b", "0", "0"),
        day_entry("c", "0", "0"),
    ]);
    let list = ScheduleListController::new();
    list.move_day(&mut store, 2, 0);

    let mut dialog = list.edit_day(&store, &ScheduleId::from("0")).unwrap();
    dialog.apply(FieldChange::Text(TextField::Description, "edited".to_string()));
    dialog.confirm(&mut store);

    let names: Vec<_> = store.items().iter().map(|a| a.item.name.as_str()).collect();
    assert_eq!(names, ["c", "a", "b"]);
    assert_eq!(store.items()[1].item.description, "edited");
}

#[test]
fn mixed_operations_never_duplicate_ids() {
    let mut store = ScheduleStore::from_entries(vec![
        day_entry("a", "0", "0"),
        day_entry("b", "0", "0"),
    ]);
    let list = ScheduleListController::new();

    for round in 0..20u64 {
        match round % 5 {
            0 => {
                store.upsert(day_entry("n", "0", "0"), None);
            }
            1 => {
                if let Some(first) = store.items().first().map(|a| a.id.clone()) {
                    list.delete_day(&mut store, &first);
                }
            }
            2 => {
                let stale = ScheduleId::from(round.to_string());
                store.upsert(day_entry("s", "0", "0"), Some(&stale));
            }
            3 => {
                let len = store.len();
                if len > 1 {
                    list.move_day(&mut store, 0, len - 1);
                }
            }
            _ => {
                let reversed = store.items().iter().rev().cloned().collect();
                store.reorder(reversed);
            }
        }
        assert_unique_ids(&store);
    }
}

#[test]
fn cancelled_dialog_does_not_reach_parent() {
    let mut store = ScheduleStore::from_entries(vec![day_entry("a", "0", "0")]);
    let fired = Rc::new(RefCell::new(0));
    let counter = fired.clone();
    let mut sync = ParentFormSync::new(store.entries(), move |_| *counter.borrow_mut() += 1);
    sync.attach(&mut store);

    let mut dialog = ScheduleListController::new()
        .edit_day(&store, &ScheduleId::from("0"))
        .unwrap();
    dialog.apply(FieldChange::Text(TextField::Name, "renamed".to_string()));
    dialog.cancel();

    assert!(!sync.flush(&store));
    assert_eq!(*fired.borrow(), 0);
}
