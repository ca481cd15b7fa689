// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::schedule::{DayEntry, ScheduleStore, SubscriptionId};

type OnChange = Box<dyn FnMut(&[DayEntry])>;

/// Propagates the committed schedule into the enclosing event draft.
///
/// The store marks the sync as pending on every mutation; [`flush`](Self::flush)
/// runs after a render pass and reports upward only when the entry list
/// differs by value from what the parent last received.
pub struct ParentFormSync {
    last_known: Vec<DayEntry>,
    pending: Rc<Cell<bool>>,
    subscription: Option<SubscriptionId>,
    on_change: OnChange,
}

impl ParentFormSync {
    pub fn new(initial: Vec<DayEntry>, on_change: impl FnMut(&[DayEntry]) + 'static) -> Self {
        Self {
            last_known: initial,
            pending: Rc::new(Cell::new(true)),
            subscription: None,
            on_change: Box::new(on_change),
        }
    }

    /// Subscribes to the store's change notifications.
    pub fn attach(&mut self, store: &mut ScheduleStore) {
        self.detach(store);
        let pending = self.pending.clone();
        self.subscription = Some(store.subscribe(move |_| pending.set(true)));
        self.pending.set(true);
    }

    pub fn detach(&mut self, store: &mut ScheduleStore) {
        if let Some(id) = self.subscription.take() {
            store.unsubscribe(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// The schedule the parent currently holds.
    pub fn last_known(&self) -> &[DayEntry] {
        &self.last_known
    }

    /// Pushes the store's entries upward if they changed. Returns whether
    /// the parent was updated.
    pub fn flush(&mut self, store: &ScheduleStore) -> bool {
        if !self.pending.replace(false) {
            return false;
        }

        let entries = store.entries();
        if entries == self.last_known {
            return false;
        }

        tracing::debug!(len = entries.len(), "schedule changed, updating parent draft");
        (self.on_change)(&entries);
        self.last_known = entries;
        true
    }
}

impl fmt::Debug for ParentFormSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentFormSync")
            .field("last_known", &self.last_known)
            .field("pending", &self.pending.get())
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
