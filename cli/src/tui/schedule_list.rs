// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventdesk_core::schedule::{INVALID_RANGE, ScheduleId};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{FormItem, FormItemState};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventFormStore;

/// Lines per row: slot, name and range, then the description.
const ROW_HEIGHT: u16 = 2;

/// The reorderable list of days inside the event form.
#[derive(Debug, Default)]
pub struct ScheduleSection {
    active: bool,
    selected: usize,
}

impl ScheduleSection {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp(&mut self, store: &RefCell<EventFormStore>) -> usize {
        let len = store.borrow().schedule.len();
        self.selected = self.selected.min(len.saturating_sub(1));
        len
    }

    fn selected_id(&self, store: &RefCell<EventFormStore>) -> Option<ScheduleId> {
        let store = store.borrow();
        store.schedule.items().get(self.selected).map(|a| a.id.clone())
    }

    fn move_selected(&mut self, dispatcher: &mut Dispatcher, len: usize, up: bool) -> Message {
        let from = self.selected;
        let to = match up {
            true if from > 0 => from - 1,
            false if from + 1 < len => from + 1,
            _ => return Message::Handled,
        };
        dispatcher.dispatch(Action::MoveDay { from, to });
        self.selected = to;
        Message::Handled
    }
}

impl Component<EventFormStore> for ScheduleSection {
    fn render(&self, store: &RefCell<EventFormStore>, area: Rect, buf: &mut Buffer) {
        let rows = store.borrow().rows();
        let [list_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        if rows.is_empty() {
            Paragraph::new("No days yet.".dim()).render(list_area, buf);
        } else {
            let selected = self.selected.min(rows.len() - 1);
            let visible = usize::from((list_area.height / ROW_HEIGHT).max(1));
            let offset = (selected + 1).saturating_sub(visible);

            let mut lines = Vec::with_capacity(visible * 2);
            for (i, row) in rows.iter().enumerate().skip(offset).take(visible) {
                let range = match row.range == INVALID_RANGE {
                    true => row.range.as_str().red(),
                    false => row.range.as_str().into(),
                };
                let mut head = Line::from(vec![
                    Span::from(format!("Slot {}", row.slot)).bold(),
                    "  ".into(),
                    row.name.as_str().into(),
                    "  ".into(),
                    range,
                ]);
                if self.active && i == selected {
                    head = head.reversed();
                }
                lines.push(head);
                lines.push(Line::from(Span::from(format!("    {}", row.description)).dim()));
            }
            Paragraph::new(lines).render(list_area, buf);
        }

        let hint = match self.active {
            true => hint(),
            false => Line::default(),
        };
        hint.render(hint_area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let len = self.clamp(store);
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        match event.code {
            KeyCode::Char('a') => dispatcher.dispatch(Action::AddDay),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id(store) {
                    dispatcher.dispatch(Action::EditDay(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id(store) {
                    dispatcher.dispatch(Action::DeleteDay(id));
                    self.clamp(store);
                }
            }
            KeyCode::Char('K') => return Some(self.move_selected(dispatcher, len, true)),
            KeyCode::Char('J') => return Some(self.move_selected(dispatcher, len, false)),
            KeyCode::Up if shift => return Some(self.move_selected(dispatcher, len, true)),
            KeyCode::Down if shift => return Some(self.move_selected(dispatcher, len, false)),
            KeyCode::Up | KeyCode::Char('k') if self.selected > 0 => self.selected -= 1,
            KeyCode::Down | KeyCode::Char('j') if self.selected + 1 < len => self.selected += 1,
            _ => return None, // leave navigation to the form
        }
        Some(Message::Handled)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<EventFormStore>) {
        self.active = true;
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<EventFormStore>) {
        self.active = false;
    }
}

impl FormItem<EventFormStore> for ScheduleSection {
    fn item_title(&self, _store: &RefCell<EventFormStore>) -> &str {
        "Schedule"
    }

    fn item_state(&self, _store: &RefCell<EventFormStore>) -> FormItemState {
        if self.active {
            FormItemState::Active
        } else {
            FormItemState::Inactive
        }
    }

    fn item_constraint(&self, _store: &RefCell<EventFormStore>) -> Constraint {
        Constraint::Min(6)
    }
}

fn hint() -> Line<'static> {
    Line::from(vec![
        "<a>".blue().bold(),
        " add  ".into(),
        "<e>".blue().bold(),
        " edit  ".into(),
        "<d>".blue().bold(),
        " delete  ".into(),
        "<K/J>".blue().bold(),
        " move".into(),
    ])
}
