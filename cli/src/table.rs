// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::arg::OutputFormat;

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

#[derive(Debug)]
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [&'a T],
    separator: &'static str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub const fn new(columns: &'a [C], data: &'a [&'a T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(col.name().width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|record| self.columns.iter().map(|col| col.format(record)).collect())
            .collect();
        let widths = self.widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
            let name = col.name();
            let cell = pad(&name, *width, col.padding_direction(), i == last);
            write!(f, "{}", cell.bold())?;
            f.write_str(if i == last { "\n" } else { self.separator })?;
        }

        for (record, row) in self.data.iter().zip(&rows) {
            for (i, ((col, width), cell)) in self.columns.iter().zip(&widths).zip(row).enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                match col.color(record) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => f.write_str(&cell)?,
                }
                f.write_str(if i == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // no trailing spaces on the last column
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}

/// Prints records as a table, or as a JSON array.
pub fn print_records<T, C>(
    records: &[&T],
    columns: &[C],
    output_format: OutputFormat,
    noun: &str,
) -> Result<(), Box<dyn Error>>
where
    T: serde::Serialize,
    C: TableColumn<T>,
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Table if records.is_empty() => {
            println!("{}", format!("No {noun}s found").italic());
        }
        OutputFormat::Table => print!("{}", Table::new(columns, records)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, u32);

    enum Col {
        Name,
        Count,
    }

    impl TableColumn<Row> for Col {
        fn name(&self) -> Cow<'_, str> {
            match self {
                Col::Name => "Name".into(),
                Col::Count => "Count".into(),
            }
        }

        fn format<'a>(&self, data: &'a Row) -> Cow<'a, str> {
            match self {
                Col::Name => data.0.into(),
                Col::Count => data.1.to_string().into(),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Col::Name => PaddingDirection::Left,
                Col::Count => PaddingDirection::Right,
            }
        }
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        colored::control::set_override(false);
        let rows = [Row("Algebra", 3), Row("中文", 12)];
        let refs: Vec<&Row> = rows.iter().collect();
        let columns = [Col::Name, Col::Count];
        let out = Table::new(&columns, &refs).to_string();
        assert_eq!(out, "Name     Count\nAlgebra      3\n中文        12\n");
    }

    #[test]
    fn pads_never_trails_last_left_column() {
        assert_eq!(pad("ab", 5, PaddingDirection::Left, true), "ab");
        assert_eq!(pad("ab", 5, PaddingDirection::Left, false), "ab   ");
        assert_eq!(pad("ab", 5, PaddingDirection::Right, true), "   ab");
    }
}
