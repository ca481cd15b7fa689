// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use eventdesk_core::schedule::{DateField, ScheduleId, TextField};
use eventdesk_core::{EventStatus, EventType};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    UpdateEventName(String),
    UpdateEventDescription(String),
    UpdateEventDescriptionShort(String),
    UpdateEventStart(String),
    UpdateEventStatus(EventStatus),
    UpdateEventType(EventType),
    UpdateEventCategories(Vec<String>),
    UpdateEventDisplaySchedule(bool),

    AddDay,
    EditDay(ScheduleId),
    DeleteDay(ScheduleId),
    MoveDay { from: usize, to: usize },

    UpdateDayText(TextField, String),
    UpdateDayDate(DateField, String),
    UpdateDayDisplay(bool),
    ConfirmDay,
    CancelDay,

    SubmitChanges,
}
