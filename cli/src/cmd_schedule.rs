// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use eventdesk_core::Desk;
use eventdesk_core::schedule::{ScheduleListController, ScheduleStore};

use crate::cmd_event::{arg_id, get_id};
use crate::schedule_formatter::ScheduleFormatter;
use crate::tui;
use crate::util::OutputFormat;

/// Opens the schedule editor of one event, or prints its rows with `--print`.
#[derive(Debug, Clone)]
pub struct CmdSchedule {
    pub id: String,
    pub print: bool,
    pub output_format: OutputFormat,
}

impl CmdSchedule {
    pub const NAME: &str = "schedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("s")
            .about("Edit the day-by-day schedule of an event using TUI")
            .arg(arg_id())
            .arg(arg!(-p --print "Print the schedule instead of opening the editor"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            print: matches.get_flag("print"),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, desk: &Desk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening schedule...");
        let draft = desk.event_draft(&self.id).await?;

        if self.print {
            let store = ScheduleStore::from_entries(draft.schedule().to_vec());
            let rows = ScheduleListController::new().rows(&store, desk.time_zone());
            let formatter = ScheduleFormatter::new()
                .with_header(true)
                .with_output_format(self.output_format);
            print!("{}", formatter.format(&rows));
            return Ok(());
        }

        let before = draft.schedule().to_vec();
        let draft = match tui::edit_schedule(desk, draft)? {
            Some(draft) => draft,
            None => {
                tracing::info!("user cancel the schedule editing");
                return Ok(());
            }
        };

        if draft.schedule() == before.as_slice() {
            println!("{}", "Schedule unchanged".dimmed());
            return Ok(());
        }

        let days = draft.schedule().len();
        let event = desk.save_event(draft).await?;
        println!("{} {} ({days} days)", "Saved".green(), event.id);
        Ok(())
    }
}
