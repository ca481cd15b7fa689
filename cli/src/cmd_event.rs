// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg};
use colored::Colorize;
use eventdesk_core::schedule::{ScheduleListController, ScheduleStore, format_timestamp};
use eventdesk_core::{Desk, EventRecord, EventShort};

use crate::event_formatter::EventFormatter;
use crate::schedule_formatter::ScheduleFormatter;
use crate::tui;
use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events ordered by start date")
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let events = desk.list_events().await?;
        print_events(desk, &events, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventShow {
    pub id: String,
    pub output_format: OutputFormat,
}

impl CmdEventShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show an event and its schedule")
            .arg(arg_id())
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing event...");
        let event = desk.get_event(&self.id).await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
            OutputFormat::Table => print_event_detail(desk, &event),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventNew {
    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new event using TUI")
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating new event...");
        let draft = match tui::edit_event(desk, desk.default_event_draft())? {
            Some(draft) => draft,
            None => {
                tracing::info!("user cancel the event creation");
                return Ok(());
            }
        };

        let event = desk.save_event(draft).await?;
        print_events(desk, &[EventShort::from(&event)], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event using TUI")
            .arg(arg_id())
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let draft = desk.event_draft(&self.id).await?;
        let draft = match tui::edit_event(desk, draft)? {
            Some(draft) => draft,
            None => {
                tracing::info!("user cancel the event editing");
                return Ok(());
            }
        };

        let event = desk.save_event(draft).await?;
        print_events(desk, &[EventShort::from(&event)], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(arg_id())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        desk.delete_event(&self.id).await?;
        println!("{} {}", "Deleted".green(), self.id);
        Ok(())
    }
}

pub(crate) fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the event")
}

pub(crate) fn get_id(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("id")
        .cloned()
        .unwrap_or_default() // required by clap
}

fn print_events(desk: &Desk, events: &[EventShort], output_format: OutputFormat) {
    let formatter = EventFormatter::new(desk.time_zone().clone()).with_output_format(output_format);
    println!("{}", formatter.format(events));
}

fn print_event_detail(desk: &Desk, event: &EventRecord) {
    let tz = desk.time_zone();
    let field = |name: &str, value: &str| println!("{:>12} {}", name.bold(), value);

    field("ID", &event.id);
    field("Name", &event.name);
    field("Status", &event.status.label());
    field("Type", &event.kind.label());
    if !event.start_date.trim().is_empty() {
        let start = format_timestamp(&event.start_date, tz)
            .unwrap_or_else(|_| event.start_date.clone());
        field("Start", &start);
    }
    let categories: Vec<&str> = event.category.iter().map(|c| c.label.as_str()).collect();
    field("Categories", &categories.join(", "));
    field("Summary", &event.description_short);
    field("Description", &event.description);

    if event.schedule.is_empty() {
        return;
    }

    println!();
    let visibility = match event.display_schedule {
        true => "shown",
        false => "hidden",
    };
    println!("{} ({visibility})", "Schedule".bold());
    let store = ScheduleStore::from_entries(event.schedule.clone());
    let rows = ScheduleListController::new().rows(&store, tz);
    print!("{}", ScheduleFormatter::new().format(&rows));
}
