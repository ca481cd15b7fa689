// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use eventdesk_core::schedule::{INVALID_RANGE, ScheduleRow};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct ScheduleFormatter {
    columns: Vec<ScheduleColumn>,
    format: OutputFormat,
    header: bool,
}

impl ScheduleFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                ScheduleColumn::Slot,
                ScheduleColumn::Name,
                ScheduleColumn::Range,
                ScheduleColumn::Description,
            ],
            format: OutputFormat::Table,
            header: false,
        }
    }

    /// Prints column names above the table output.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, rows: &'a [ScheduleRow]) -> Display<'a> {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rows: &'a [ScheduleRow],
    formatter: &'a ScheduleFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.rows)
            ),
            OutputFormat::Table => {
                let style = TableStyleBasic::new().with_header(self.formatter.header);
                write!(f, "{}", Table::new(style, &self.formatter.columns, self.rows))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ScheduleColumn {
    Slot,
    Name,
    Range,
    Description,
}

impl TableColumn<ScheduleRow> for ScheduleColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ScheduleColumn::Slot => "Slot",
            ScheduleColumn::Name => "Name",
            ScheduleColumn::Range => "Date",
            ScheduleColumn::Description => "Description",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a ScheduleRow) -> Cow<'a, str> {
        match self {
            ScheduleColumn::Slot => format!("Slot {}", data.slot).into(),
            ScheduleColumn::Name => data.name.as_str().into(),
            ScheduleColumn::Range => data.range.as_str().into(),
            ScheduleColumn::Description => data.description.as_str().into(),
        }
    }

    fn color(&self, data: &ScheduleRow) -> Option<Color> {
        match self {
            ScheduleColumn::Range if data.range == INVALID_RANGE => Some(Color::Red),
            _ => None,
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
}
