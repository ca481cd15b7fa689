// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use eventdesk_core::schedule::{INVALID_RANGE, format_timestamp};
use eventdesk_core::{EventShort, EventStatus};
use jiff::tz::TimeZone;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::Start(tz),
                EventColumn::Status,
                EventColumn::Kind,
                EventColumn::Name,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [EventShort]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [EventShort],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.events)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Id,
    Start(TimeZone),
    Status,
    Kind,
    Name,
}

impl TableColumn<EventShort> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Start(_) => "Start",
            EventColumn::Status => "Status",
            EventColumn::Kind => "Type",
            EventColumn::Name => "Name",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a EventShort) -> Cow<'a, str> {
        match self {
            EventColumn::Id => data.id.as_str().into(),
            EventColumn::Start(_) if data.start_date.trim().is_empty() => "".into(),
            EventColumn::Start(tz) => format_timestamp(&data.start_date, tz)
                .unwrap_or_else(|_| INVALID_RANGE.to_string())
                .into(),
            EventColumn::Status => data.status.label().into(),
            EventColumn::Kind => data.kind.label().into(),
            EventColumn::Name => data.name.as_str().into(),
        }
    }

    fn color(&self, data: &EventShort) -> Option<Color> {
        match self {
            EventColumn::Status => Some(match data.status {
                EventStatus::Upcoming => Color::Blue,
                EventStatus::Ongoing => Color::Green,
                EventStatus::Completed => Color::BrightBlack,
                EventStatus::Cancelled => Color::Red,
            }),
            _ => None,
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
}
