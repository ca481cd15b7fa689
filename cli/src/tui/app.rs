// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use eventdesk_core::{Desk, EventDraft};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_editor::EventEditor;
use crate::tui::event_store::EventFormStore;

/// Edits every field of the event. Returns `None` when the user leaves without saving.
pub fn edit_event(desk: &Desk, draft: EventDraft) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let view = EventEditor::event_form(desk.categories());
    run_event_editor(desk, draft, view)
}

/// Edits the schedule of the event only.
pub fn edit_schedule(desk: &Desk, draft: EventDraft) -> Result<Option<EventDraft>, Box<dyn Error>> {
    run_event_editor(desk, draft, EventEditor::schedule_only())
}

fn run_event_editor(
    desk: &Desk,
    draft: EventDraft,
    mut view: EventEditor,
) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let store = EventFormStore::new(draft, desk.categories().to_vec(), desk.time_zone().clone());
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        EventFormStore::register_to(store.clone(), &mut dispatcher);
        view.activate(&mut dispatcher, &store);

        loop {
            let area = match draw(&view, &store, &mut terminal) {
                Ok(area) => area,
                Err(e) => break Err(e),
            };

            // schedule edits reach the draft once per frame
            store.borrow_mut().flush();

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(Message::Exit) = view.on_key(&mut dispatcher, &store, area, key) {
                        break Ok(());
                    }
                }
                Ok(_) => {} // Continue the loop to render the next frame
                Err(e) => break Err(e.into()),
            }
        }
    }; // release dispatcher and its callbacks here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    match store.submit {
        true => store.submit_draft().map(Some),
        false => Ok(None),
    }
}

fn draw(
    view: &EventEditor,
    store: &RefCell<EventFormStore>,
    terminal: &mut DefaultTerminal,
) -> Result<ratatui::layout::Rect, Box<dyn Error>> {
    let frame = terminal.draw(|frame| {
        let area = frame.area();
        view.render(store, area, frame.buffer_mut());
        if let Some(pos) = view.get_cursor_position(store, area) {
            frame.set_cursor_position(pos);
        }
    })?;
    Ok(frame.area)
}
