// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Ref, RefCell};
use std::{error::Error, fmt, rc::Rc};

use eventdesk_core::schedule::{
    DateField, FieldChange, ParentFormSync, ScheduleEditorDialog, ScheduleListController,
    ScheduleRow, ScheduleStore,
};
use eventdesk_core::{Category, EventDraft};
use jiff::tz::TimeZone;

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{format_datetime, parse_datetime, parse_datetime_millis};

/// State behind the event form: the parent draft, its schedule and the open day dialog.
pub struct EventFormStore {
    draft: Rc<RefCell<EventDraft>>,

    /// Start date as typed, `YYYY-MM-DD HH:MM`
    pub start: String,
    start_dirty: bool,

    pub schedule: ScheduleStore,
    list: ScheduleListController,
    sync: ParentFormSync,

    /// The day editor, when open
    pub dialog: Option<DayDialog>,

    /// Categories offered by the form
    pub categories: Vec<Category>,

    pub tz: TimeZone,

    /// Last validation failure, shown to the user
    pub error: Option<String>,

    /// Whether the user submit the changes
    pub submit: bool,
}

impl EventFormStore {
    pub fn new(draft: EventDraft, categories: Vec<Category>, tz: TimeZone) -> Self {
        let entries = draft.schedule().to_vec();
        let start = format_datetime(&draft.record().start_date, &tz);
        let draft = Rc::new(RefCell::new(draft));

        let mut schedule = ScheduleStore::from_entries(entries.clone());
        let parent = draft.clone();
        let mut sync = ParentFormSync::new(entries, move |days| {
            parent.borrow_mut().set_schedule(days.to_vec());
        });
        sync.attach(&mut schedule);

        Self {
            draft,
            start,
            start_dirty: false,
            schedule,
            list: ScheduleListController::new(),
            sync,
            dialog: None,
            categories,
            tz,
            error: None,
            submit: false,
        }
    }

    pub fn event(&self) -> Ref<'_, EventDraft> {
        self.draft.borrow()
    }

    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.list.rows(&self.schedule, &self.tz)
    }

    /// Pushes pending schedule changes into the draft. Returns whether the draft changed.
    pub fn flush(&mut self) -> bool {
        self.sync.flush(&self.schedule)
    }

    /// Finishes the editing. The stored start date is rewritten only when its text was edited.
    pub fn submit_draft(mut self) -> Result<EventDraft, Box<dyn Error>> {
        self.flush();
        let start = match self.start_dirty {
            true => Some(parse_datetime_millis(&self.start, &self.tz)?),
            false => None,
        };

        let Self {
            draft,
            mut schedule,
            mut sync,
            ..
        } = self;
        sync.detach(&mut schedule);
        drop(sync);

        let mut draft = Rc::try_unwrap(draft)
            .map_err(|_| "Draft still has references")?
            .into_inner();

        let record = draft.record_mut();
        if let Some(start) = start {
            record.start_date = start;
        }
        if record.name.trim().is_empty() {
            record.name = "New event".to_string();
        }
        Ok(draft)
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut guard = that.borrow_mut();
            guard.reduce(action);
        }));
        dispatcher.register(callback);
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::UpdateEventName(v) => self.record_mut(|r| r.name = v.clone()),
            Action::UpdateEventDescription(v) => self.record_mut(|r| r.description = v.clone()),
            Action::UpdateEventDescriptionShort(v) => {
                self.record_mut(|r| r.description_short = v.clone())
            }
            Action::UpdateEventStart(v) => {
                self.start = v.clone();
                self.start_dirty = true;
                // invalid text is kept as typed and rejected on submit
                if let Ok(ms) = parse_datetime_millis(v, &self.tz) {
                    self.record_mut(|r| r.start_date = ms);
                }
            }
            Action::UpdateEventStatus(v) => self.record_mut(|r| r.status = *v),
            Action::UpdateEventType(v) => self.record_mut(|r| r.kind = *v),
            Action::UpdateEventCategories(ids) => {
                let current = self.event().record().category.clone();
                let category = ids
                    .iter()
                    .filter_map(|id| {
                        self.categories
                            .iter()
                            .chain(current.iter())
                            .find(|c| &c.id == id)
                            .cloned()
                    })
                    .collect();
                self.record_mut(|r| r.category = category);
            }
            Action::UpdateEventDisplaySchedule(v) => self.record_mut(|r| r.display_schedule = *v),

            Action::AddDay => {
                self.error = None;
                self.dialog = Some(DayDialog::new(self.list.add_day(), &self.tz));
            }
            Action::EditDay(id) => {
                self.error = None;
                match self.list.edit_day(&self.schedule, id) {
                    Some(editor) => self.dialog = Some(DayDialog::new(editor, &self.tz)),
                    None => tracing::warn!(%id, "no day to edit"),
                }
            }
            Action::DeleteDay(id) => self.list.delete_day(&mut self.schedule, id),
            Action::MoveDay { from, to } => self.list.move_day(&mut self.schedule, *from, *to),

            Action::UpdateDayText(field, v) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.editor.apply(FieldChange::Text(*field, v.clone()));
                }
            }
            Action::UpdateDayDate(field, v) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.set_date_text(*field, v.clone(), &self.tz);
                }
            }
            Action::UpdateDayDisplay(v) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.editor.apply(FieldChange::Display(*v));
                }
            }
            Action::ConfirmDay => {
                let Some(dialog) = self.dialog.take() else {
                    return;
                };
                match dialog.validate(&self.tz) {
                    Ok(()) => {
                        self.error = None;
                        let id = dialog.editor.confirm(&mut self.schedule);
                        tracing::debug!(%id, "day saved");
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        self.dialog = Some(dialog);
                    }
                }
            }
            Action::CancelDay => {
                self.error = None;
                if let Some(dialog) = self.dialog.take() {
                    dialog.editor.cancel();
                }
            }

            Action::SubmitChanges => self.submit = true,
        }
    }

    fn record_mut(&self, f: impl FnOnce(&mut eventdesk_core::EventRecord)) {
        f(self.draft.borrow_mut().record_mut());
    }
}

impl fmt::Debug for EventFormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFormStore")
            .field("draft", &self.draft)
            .field("start", &self.start)
            .field("start_dirty", &self.start_dirty)
            .field("schedule", &self.schedule)
            .field("dialog", &self.dialog)
            .field("error", &self.error)
            .field("submit", &self.submit)
            .finish_non_exhaustive()
    }
}

/// An open day editor with the date inputs as typed.
#[derive(Debug)]
pub struct DayDialog {
    pub editor: ScheduleEditorDialog,
    pub start: String,
    pub end: String,
}

impl DayDialog {
    fn new(editor: ScheduleEditorDialog, tz: &TimeZone) -> Self {
        let start = format_datetime(editor.date(DateField::Start), tz);
        let end = format_datetime(editor.date(DateField::End), tz);
        Self { editor, start, end }
    }

    pub fn date_text(&self, field: DateField) -> &str {
        match field {
            DateField::Start => &self.start,
            DateField::End => &self.end,
        }
    }

    fn set_date_text(&mut self, field: DateField, text: String, tz: &TimeZone) {
        match parse_datetime(&text, tz) {
            Ok(Some(ts)) => self.editor.apply(FieldChange::Date(field, ts)),
            Ok(None) => self.editor.apply(FieldChange::ClearDate(field)),
            Err(_) => {} // reported on confirm
        }

        match field {
            DateField::Start => self.start = text,
            DateField::End => self.end = text,
        }
    }

    fn validate(&self, tz: &TimeZone) -> Result<(), Box<dyn Error>> {
        parse_datetime(&self.start, tz).map_err(|e| format!("Start: {e}"))?;
        parse_datetime(&self.end, tz).map_err(|e| format!("End: {e}"))?;
        Ok(())
    }
}
