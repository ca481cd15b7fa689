// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! Create an event, edit its schedule through the store and the parent form
//! sync, save it again, and check the documents on disk.

use std::cell::RefCell;
use std::rc::Rc;

use tokio::fs;

use eventdesk_core::schedule::{
    FieldChange, ParentFormSync, ScheduleListController, ScheduleStore, TextField,
};
use eventdesk_core::{Desk, EventDraft, EventStatus, RepoError};

use crate::common::{assert_file_exists, day_entry, setup_temp_dirs, test_config, test_event};

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let desk = Desk::new(test_config(&temp_dirs.data_dir)).await.unwrap();
    let mut record = test_event("Hackathon");
    record.schedule = vec![day_entry("Day 1", "0", "3600000")];

    // Act
    let saved = desk.save_event(EventDraft::new(record, true)).await.unwrap();

    // Assert - verify id assigned and documents written
    assert!(saved.id.starts_with("event-"));
    assert_file_exists(&temp_dirs.data_dir.join(format!("events/{}.json", saved.id)));
    assert_file_exists(&temp_dirs.data_dir.join("data/events.json"));

    // Assert - verify index and retrieval
    let events = desk.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, saved.id);
    assert_eq!(events[0].name, "Hackathon");

    let fetched = desk.get_event(&saved.id).await.unwrap();
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn event_lifecycle_schedule_edit_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let desk = Desk::new(test_config(&temp_dirs.data_dir)).await.unwrap();
    let mut record = test_event("Conference");
    record.schedule = vec![
        day_entry("Day 1", "0", "0"),
        day_entry("Day 2", "86400000", "86400000"),
    ];
    let saved = desk.save_event(EventDraft::new(record, true)).await.unwrap();

    // Act - open the form, swap the two days, drop the first, add one more
    let draft = Rc::new(RefCell::new(desk.event_draft(&saved.id).await.unwrap()));
    let mut store = ScheduleStore::from_entries(draft.borrow().schedule().to_vec());
    let sink = draft.clone();
    let mut sync = ParentFormSync::new(draft.borrow().schedule().to_vec(), move |s| {
        sink.borrow_mut().set_schedule(s.to_vec())
    });
    sync.attach(&mut store);

    let list = ScheduleListController::new();
    list.move_day(&mut store, 1, 0);
    sync.flush(&store);

    let mut dialog = list.add_day();
    dialog.apply(FieldChange::Text(TextField::Name, "Day 3".to_string()));
    dialog.confirm(&mut store);
    let first = store.items()[1].id.clone();
    list.delete_day(&mut store, &first);
    sync.flush(&store);

    drop(sync);
    let mut draft = Rc::try_unwrap(draft).unwrap().into_inner();
    let names: Vec<_> = draft.schedule().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Day 2", "Day 3"]);

    draft.record_mut().status = EventStatus::Ongoing;
    desk.save_event(draft).await.unwrap();

    // Assert - the document carries the new order and no ids
    let path = temp_dirs.data_dir.join(format!("events/{}.json", saved.id));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).await.unwrap()).unwrap();
    let schedule = json["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule[0]["name"], "Day 2");
    assert_eq!(schedule[1]["name"], "Day 3");
    assert!(schedule[0].get("id").is_none());
    assert_eq!(json["status"], "ongoing");

    let events = desk.list_events().await.unwrap();
    assert_eq!(events[0].status, EventStatus::Ongoing);
}

#[tokio::test]
async fn event_lifecycle_delete_flow() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let desk = Desk::new(test_config(&temp_dirs.data_dir)).await.unwrap();
    let saved = desk
        .save_event(EventDraft::new(test_event("Workshop"), true))
        .await
        .unwrap();

    desk.delete_event(&saved.id).await.unwrap();

    assert!(desk.list_events().await.unwrap().is_empty());
    let err = desk.get_event(&saved.id).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RepoError>(),
        Some(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn event_lifecycle_rejects_path_like_ids() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let desk = Desk::new(test_config(&temp_dirs.data_dir)).await.unwrap();

    let err = desk.get_event("../secrets").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RepoError>(),
        Some(RepoError::InvalidId(_))
    ));
}

#[tokio::test]
async fn event_lifecycle_lists_by_start_date() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let desk = Desk::new(test_config(&temp_dirs.data_dir)).await.unwrap();

    for (name, start) in [("later", "2000"), ("undated", ""), ("sooner", "1000")] {
        let mut record = test_event(name);
        record.start_date = start.to_string();
        desk.save_event(EventDraft::new(record, true)).await.unwrap();
    }

    let names: Vec<_> = desk
        .list_events()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["sooner", "later", "undated"]);
}
