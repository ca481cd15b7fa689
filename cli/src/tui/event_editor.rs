// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventdesk_core::{Category, EventStatus, EventType};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Checkbox, Form, FormItem, Input, MultiSelect, RadioGroup};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventFormStore;
use crate::tui::schedule_dialog::ScheduleDialogView;
use crate::tui::schedule_list::ScheduleSection;

type EventForm = Form<EventFormStore, Box<dyn FormItem<EventFormStore>>>;

/// Root view of the editor: the form page plus the day dialog when it is open.
pub struct EventEditor {
    page: SinglePage<EventFormStore, EventForm>,
    dialog: Option<ScheduleDialogView>,
}

impl EventEditor {
    /// The full event form, with the schedule as its last section.
    pub fn event_form(categories: &[Category]) -> Self {
        let form = Form::new(vec![
            Box::new(new_name()) as Box<dyn FormItem<EventFormStore>>,
            Box::new(new_description()),
            Box::new(new_description_short()),
            Box::new(new_start()),
            Box::new(new_status()),
            Box::new(new_type()),
            Box::new(new_categories(categories)),
            Box::new(new_display_schedule()),
            Box::new(ScheduleSection::new()),
        ]);
        Self::new("Event Editor", form)
    }

    /// Only the schedule of an event.
    pub fn schedule_only() -> Self {
        let form = Form::new(vec![
            Box::new(ScheduleSection::new()) as Box<dyn FormItem<EventFormStore>>,
        ]);
        Self::new("Schedule Editor", form)
    }

    fn new(title: &str, form: EventForm) -> Self {
        Self {
            page: SinglePage::new(title.to_owned(), form),
            dialog: None,
        }
    }

    /// Opens or closes the dialog view to follow the store.
    fn sync_dialog(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        let open = store.borrow().dialog.is_some();
        match (open, self.dialog.is_some()) {
            (true, false) => {
                let mut view = ScheduleDialogView::new();
                view.activate(dispatcher, store);
                self.dialog = Some(view);
            }
            (false, true) => {
                if let Some(mut view) = self.dialog.take() {
                    view.deactivate(dispatcher, store);
                }
            }
            _ => {}
        }
    }
}

impl Component<EventFormStore> for EventEditor {
    fn render(&self, store: &RefCell<EventFormStore>, area: Rect, buf: &mut Buffer) {
        self.page.render(store, area, buf);
        if let Some(dialog) = &self.dialog {
            dialog.render(store, area, buf);
        }
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<EventFormStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        match &self.dialog {
            Some(dialog) => dialog.get_cursor_position(store, area),
            None => self.page.get_cursor_position(store, area),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if let Some(dialog) = &mut self.dialog {
            dialog.on_key(dispatcher, store, area, event);
            self.sync_dialog(dispatcher, store);
            return Some(Message::Handled); // modal
        }

        if event.code == KeyCode::Char('s') && event.modifiers.contains(KeyModifiers::CONTROL) {
            dispatcher.dispatch(Action::SubmitChanges);
            return Some(Message::Exit);
        }

        let msg = self.page.on_key(dispatcher, store, area, event);
        self.sync_dialog(dispatcher, store);
        msg
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.page.activate(dispatcher, store);
        self.sync_dialog(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        if let Some(mut dialog) = self.dialog.take() {
            dialog.deactivate(dispatcher, store);
        }
        self.page.deactivate(dispatcher, store);
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<EventFormStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<EventFormStore, String> for $acc {
            fn get(store: &RefCell<EventFormStore>) -> String {
                store.borrow().event().record().$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_name, "Name", NameAccess, name, UpdateEventName);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    UpdateEventDescription
);
new_input!(
    new_description_short,
    "Short description",
    DescriptionShortAccess,
    description_short,
    UpdateEventDescriptionShort
);

fn new_start() -> Input<EventFormStore, StartAccess> {
    Input::new("Start (YYYY-MM-DD HH:MM)")
}

/// Reads the start as typed, since the draft only holds the parsed value.
struct StartAccess;

impl Access<EventFormStore, String> for StartAccess {
    fn get(store: &RefCell<EventFormStore>) -> String {
        store.borrow().start.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateEventStart(value));
        true
    }
}

fn new_status() -> RadioGroup<EventFormStore, EventStatus, StatusAccess> {
    let values = EventStatus::ALL.to_vec();
    let options = values.iter().map(EventStatus::label).collect();
    RadioGroup::new("Status", values, options)
}

struct StatusAccess;

impl Access<EventFormStore, EventStatus> for StatusAccess {
    fn get(store: &RefCell<EventFormStore>) -> EventStatus {
        store.borrow().event().record().status
    }

    fn set(dispatcher: &mut Dispatcher, value: EventStatus) -> bool {
        dispatcher.dispatch(Action::UpdateEventStatus(value));
        true
    }
}

fn new_type() -> RadioGroup<EventFormStore, EventType, TypeAccess> {
    let values = EventType::ALL.to_vec();
    let options = values.iter().map(EventType::label).collect();
    RadioGroup::new("Type", values, options)
}

struct TypeAccess;

impl Access<EventFormStore, EventType> for TypeAccess {
    fn get(store: &RefCell<EventFormStore>) -> EventType {
        store.borrow().event().record().kind
    }

    fn set(dispatcher: &mut Dispatcher, value: EventType) -> bool {
        dispatcher.dispatch(Action::UpdateEventType(value));
        true
    }
}

fn new_categories(categories: &[Category]) -> MultiSelect<EventFormStore, CategoriesAccess> {
    let options = categories
        .iter()
        .map(|c| (c.id.clone(), c.label.clone()))
        .collect();
    MultiSelect::new("Categories", options)
}

struct CategoriesAccess;

impl Access<EventFormStore, Vec<String>> for CategoriesAccess {
    fn get(store: &RefCell<EventFormStore>) -> Vec<String> {
        let store = store.borrow();
        let event = store.event();
        event.record().category.iter().map(|c| c.id.clone()).collect()
    }

    fn set(dispatcher: &mut Dispatcher, value: Vec<String>) -> bool {
        dispatcher.dispatch(Action::UpdateEventCategories(value));
        true
    }
}

fn new_display_schedule() -> Checkbox<EventFormStore, DisplayScheduleAccess> {
    Checkbox::new("Schedule visibility", "Show the schedule on the event page")
}

struct DisplayScheduleAccess;

impl Access<EventFormStore, bool> for DisplayScheduleAccess {
    fn get(store: &RefCell<EventFormStore>) -> bool {
        store.borrow().event().record().display_schedule
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(Action::UpdateEventDisplaySchedule(value));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use eventdesk_core::schedule::{DateField, TextField};
    use eventdesk_core::{EventDraft, EventRecord};
    use jiff::tz::TimeZone;

    fn setup() -> (Rc<RefCell<EventFormStore>>, Dispatcher) {
        let draft = EventDraft::new(EventRecord::default_draft(), true);
        let store = EventFormStore::new(draft, vec![], TimeZone::UTC);
        let store = Rc::new(RefCell::new(store));
        let mut dispatcher = Dispatcher::new();
        EventFormStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typing(
        editor: &mut EventEditor,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        area: Rect,
        text: &str,
    ) {
        for c in text.chars() {
            editor.on_key(dispatcher, store, area, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn dialog_is_modal_and_confirms_with_enter() {
        let (store, mut dispatcher) = setup();
        let mut editor = EventEditor::schedule_only();
        let area = Rect::new(0, 0, 80, 30);
        editor.activate(&mut dispatcher, &store);

        editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Char('a')));
        assert!(editor.dialog.is_some());

        // keys go to the dialog, not the page
        typing(&mut editor, &mut dispatcher, &store, area, "Day 1");
        {
            let store = store.borrow();
            let dialog = store.dialog.as_ref().unwrap();
            assert_eq!(dialog.editor.text(TextField::Name), "Day 1");
        }

        let msg = editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Enter));
        assert_eq!(msg, Some(Message::Handled));
        assert!(editor.dialog.is_none());
        assert_eq!(store.borrow().schedule.len(), 1);
    }

    #[test]
    fn escape_cancels_the_dialog_before_exiting() {
        let (store, mut dispatcher) = setup();
        let mut editor = EventEditor::schedule_only();
        let area = Rect::new(0, 0, 80, 30);
        editor.activate(&mut dispatcher, &store);

        editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Char('a')));
        let msg = editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Esc));
        assert_eq!(msg, Some(Message::Handled));
        assert!(editor.dialog.is_none());
        assert!(store.borrow().schedule.is_empty());

        let msg = editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Esc));
        assert_eq!(msg, Some(Message::Exit));
        assert!(!store.borrow().submit);
    }

    #[test]
    fn invalid_date_keeps_the_dialog_open() {
        let (store, mut dispatcher) = setup();
        let mut editor = EventEditor::schedule_only();
        let area = Rect::new(0, 0, 80, 30);
        editor.activate(&mut dispatcher, &store);

        editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Char('a')));
        dispatcher.dispatch(Action::UpdateDayDate(DateField::Start, "tomorrow".into()));
        editor.on_key(&mut dispatcher, &store, area, key(KeyCode::Enter));

        assert!(editor.dialog.is_some());
        assert!(store.borrow().error.is_some());
        assert!(store.borrow().schedule.is_empty());
    }

    #[test]
    fn ctrl_s_submits() {
        let (store, mut dispatcher) = setup();
        let mut editor = EventEditor::event_form(&[]);
        let area = Rect::new(0, 0, 80, 60);
        editor.activate(&mut dispatcher, &store);

        typing(&mut editor, &mut dispatcher, &store, area, "Launch");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let msg = editor.on_key(&mut dispatcher, &store, area, ctrl_s);

        assert_eq!(msg, Some(Message::Exit));
        let store = store.borrow();
        assert!(store.submit);
        assert_eq!(store.event().record().name, "Launch");
    }
}
