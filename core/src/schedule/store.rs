// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::fmt;

use crate::schedule::{DayEntry, ScheduleId, ScheduleItem};

type Callback = Box<dyn FnMut(&ScheduleChange)>;

/// What happened to the schedule in a single mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    /// An entry was replaced in place (`created == false`) or appended.
    Upserted { id: ScheduleId, created: bool },

    /// An entry was removed.
    Removed(ScheduleId),

    /// The whole list was replaced by a new ordering.
    Reordered,
}

/// Handle returned by [`ScheduleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

/// The canonical ordered list of day entries of one event.
///
/// List order is the only source of position. Identifiers come from a
/// counter owned by the store, are never reused and never renumbered.
pub struct ScheduleStore {
    items: Vec<ScheduleItem>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: usize,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Seeds the store from a persisted schedule, assigning ids `0..n` in order.
    pub fn from_entries(entries: Vec<DayEntry>) -> Self {
        let items: Vec<_> = entries
            .into_iter()
            .enumerate()
            .map(|(i, item)| ScheduleItem {
                id: ScheduleId::from(i as u64),
                item,
            })
            .collect();

        Self {
            next_id: items.len() as u64,
            items,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    /// The day entries in list order, without their ids. This is the
    /// persisted shape of the schedule.
    pub fn entries(&self) -> Vec<DayEntry> {
        self.items.iter().map(|a| a.item.clone()).collect()
    }

    pub fn get(&self, id: &ScheduleId) -> Option<&ScheduleItem> {
        self.items.iter().find(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the entry with the given id in place, or appends a new item
    /// when `id` is `None` or unknown. Returns the id of the affected item.
    pub fn upsert(&mut self, entry: DayEntry, id: Option<&ScheduleId>) -> ScheduleId {
        if let Some(id) = id {
            if let Some(existing) = self.items.iter_mut().find(|a| &a.id == id) {
                existing.item = entry;
                let id = existing.id.clone();
                tracing::debug!(%id, "schedule entry updated");
                self.notify(&ScheduleChange::Upserted {
                    id: id.clone(),
                    created: false,
                });
                return id;
            }
            tracing::debug!(%id, "schedule id not found, appending as a new entry");
        }

        let id = self.allocate_id();
        self.items.push(ScheduleItem {
            id: id.clone(),
            item: entry,
        });
        tracing::debug!(%id, len = self.items.len(), "schedule entry appended");
        self.notify(&ScheduleChange::Upserted {
            id: id.clone(),
            created: true,
        });
        id
    }

    /// Removes the item with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ScheduleId) {
        let len = self.items.len();
        self.items.retain(|a| &a.id != id);
        if self.items.len() != len {
            tracing::debug!(%id, "schedule entry removed");
            self.notify(&ScheduleChange::Removed(id.clone()));
        }
    }

    /// Replaces the list with the given ordering.
    ///
    /// The caller is trusted to pass a permutation of the current items.
    pub fn reorder(&mut self, new_order: Vec<ScheduleItem>) {
        if !self.is_permutation(&new_order) {
            tracing::warn!(
                current = self.items.len(),
                given = new_order.len(),
                "reorder received a list that is not a permutation of the schedule"
            );
        }

        // keep freshly allocated ids ahead of anything the caller handed in
        for item in &new_order {
            if let Ok(n) = item.id.as_str().parse::<u64>() {
                self.next_id = self.next_id.max(n + 1);
            }
        }

        self.items = new_order;
        self.notify(&ScheduleChange::Reordered);
    }

    /// Registers a callback invoked after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&ScheduleChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(a, _)| *a != id);
    }

    fn allocate_id(&mut self) -> ScheduleId {
        let id = ScheduleId::from(self.next_id);
        self.next_id += 1;
        id
    }

    fn notify(&mut self, change: &ScheduleChange) {
        for (_, sub) in &mut self.subscribers {
            sub(change);
        }
    }

    fn is_permutation(&self, other: &[ScheduleItem]) -> bool {
        if other.len() != self.items.len() {
            return false;
        }
        let current: HashSet<_> = self.items.iter().map(|a| &a.id).collect();
        let given: HashSet<_> = other.iter().map(|a| &a.id).collect();
        given.len() == other.len() && current == given
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleStore")
            .field("items", &self.items)
            .field("next_id", &self.next_id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
