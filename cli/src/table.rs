// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A table of rows, rendered with a style.
pub struct Table<'a, S: TableStyle, T, C: TableColumn<T>> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        self.style.write(f, self.columns, self.data, &cells)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result;
}

/// Plain text columns separated by spaces, padded by display width.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    header: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: "  ",
            header: false,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let names: Vec<Cow<'_, str>> = columns.iter().map(|c| c.name()).collect();
        let mut widths: Vec<usize> = match self.header {
            true => names.iter().map(|name| name.width()).collect(),
            false => vec![0; columns.len()],
        };
        for row in cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }

        if self.header {
            let line: Vec<String> = names
                .iter()
                .zip(&widths)
                .zip(columns)
                .enumerate()
                .map(|(i, ((name, w), col))| {
                    pad(name, *w, col.padding_direction(), i + 1 == columns.len())
                        .bold()
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(self.separator))?;
        }

        for (row, data) in cells.iter().zip(data) {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .zip(columns)
                .enumerate()
                .map(|(i, ((cell, w), col))| {
                    let cell = pad(cell, *w, col.padding_direction(), i + 1 == columns.len());
                    match col.color(data) {
                        Some(color) => cell.color(color).to_string(),
                        None => cell,
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(self.separator))?;
        }
        Ok(())
    }
}

/// JSON array of objects keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        _data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = cells
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| (col.name().into_owned(), cell.to_string().into()))
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

// the last left-aligned column is not padded to avoid trailing spaces
fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = width.saturating_sub(cell.width());
    match direction {
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
        PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}
