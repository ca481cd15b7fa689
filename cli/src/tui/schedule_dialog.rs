// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventdesk_core::schedule::{DateField, TextField};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Checkbox, Form, FormItem, Input};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventFormStore;

type DialogForm = Form<EventFormStore, Box<dyn FormItem<EventFormStore>>>;

/// Modal editor for one day, drawn over the event form.
pub struct ScheduleDialogView {
    form: DialogForm,
}

impl ScheduleDialogView {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                Box::new(Input::<_, DayNameAccess>::new("Name")) as Box<dyn FormItem<_>>,
                Box::new(Input::<_, DayDescriptionAccess>::new("Description")),
                Box::new(Input::<_, DayStartAccess>::new("Start (YYYY-MM-DD HH:MM)")),
                Box::new(Input::<_, DayEndAccess>::new("End (YYYY-MM-DD HH:MM)")),
                Box::new(Checkbox::<_, DayDisplayAccess>::new("Visibility", "Display this day")),
            ]),
        }
    }

    fn popup(area: Rect) -> Rect {
        let [_, vertical, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(20),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, popup, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Percentage(70),
            Constraint::Fill(1),
        ])
        .areas(vertical);
        popup
    }

    fn block(title: &str) -> Block<'_> {
        Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(format!(" {title} ").bold()).centered())
            .title_bottom(instructions().centered())
    }

    fn split(inner: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner)
    }
}

impl Component<EventFormStore> for ScheduleDialogView {
    fn render(&self, store: &RefCell<EventFormStore>, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup(area);
        let title = store
            .borrow()
            .dialog
            .as_ref()
            .map(|d| d.editor.title())
            .unwrap_or_default();

        Clear.render(popup, buf);
        let block = Self::block(title);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [form_area, error_area] = Self::split(inner);
        self.form.render(store, form_area, buf);
        if let Some(error) = &store.borrow().error {
            Paragraph::new(error.as_str().red())
                .wrap(Wrap { trim: true })
                .render(error_area, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<EventFormStore>, area: Rect) -> Option<(u16, u16)> {
        let inner = Self::block("").inner(Self::popup(area));
        let [form_area, _] = Self::split(inner);
        self.form.get_cursor_position(store, form_area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        match event.code {
            KeyCode::Esc => {
                dispatcher.dispatch(Action::CancelDay);
                Some(Message::Handled)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(Action::ConfirmDay);
                Some(Message::Handled)
            }
            _ => {
                let inner = Self::block("").inner(Self::popup(area));
                let [form_area, _] = Self::split(inner);
                self.form.on_key(dispatcher, store, form_area, event)
            }
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Save ".into(),
        "<Enter>".blue().bold(),
        " Cancel ".into(),
        "<Esc> ".blue().bold(),
    ])
}

macro_rules! day_text_access {
    ($acc: ident, $field: expr) => {
        struct $acc;

        impl Access<EventFormStore, String> for $acc {
            fn get(store: &RefCell<EventFormStore>) -> String {
                let store = store.borrow();
                let dialog = store.dialog.as_ref();
                dialog.map(|d| d.editor.text($field).to_owned()).unwrap_or_default()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::UpdateDayText($field, value));
                true
            }
        }
    };
}

macro_rules! day_date_access {
    ($acc: ident, $field: expr) => {
        struct $acc;

        impl Access<EventFormStore, String> for $acc {
            fn get(store: &RefCell<EventFormStore>) -> String {
                let store = store.borrow();
                let dialog = store.dialog.as_ref();
                dialog.map(|d| d.date_text($field).to_owned()).unwrap_or_default()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::UpdateDayDate($field, value));
                true
            }
        }
    };
}

day_text_access!(DayNameAccess, TextField::Name);
day_text_access!(DayDescriptionAccess, TextField::Description);
day_date_access!(DayStartAccess, DateField::Start);
day_date_access!(DayEndAccess, DateField::End);

struct DayDisplayAccess;

impl Access<EventFormStore, bool> for DayDisplayAccess {
    fn get(store: &RefCell<EventFormStore>) -> bool {
        let store = store.borrow();
        store.dialog.as_ref().is_some_and(|d| d.editor.draft().display)
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(Action::UpdateDayDisplay(value));
        true
    }
}
