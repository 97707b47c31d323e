// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use chrono::Datelike;
use colored::{Color, Colorize};
use edudesk_core::{Event, EventStatus, GridCell, Month, WEEK_COLUMNS};

use crate::table::{PaddingDirection, TableColumn};
use crate::util::join;

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Id,
    Dates,
    Title,
    Category,
    Status,
    Audience,
}

impl EventColumn {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Id,
            Self::Dates,
            Self::Title,
            Self::Category,
            Self::Status,
            Self::Audience,
        ]
    }
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Dates => "Dates",
            Self::Title => "Title",
            Self::Category => "Type",
            Self::Status => "Status",
            Self::Audience => "Audience",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self {
            Self::Id => event.id.as_str().into(),
            Self::Dates => match event.end_date {
                Some(end) if end != event.start_date => {
                    format!("{} ~ {}", event.start_date, end).into()
                }
                _ => event.start_date.to_string().into(),
            },
            Self::Title => event.title.as_str().into(),
            Self::Category => join(&event.event_type).into(),
            Self::Status => event.status.to_string().into(),
            Self::Audience => join(&event.target_audience).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, event: &Event) -> Option<Color> {
        match self {
            Self::Status => Some(status_color(event.status)),
            _ => None,
        }
    }
}

const fn status_color(status: EventStatus) -> Color {
    match status {
        EventStatus::Upcoming => Color::Blue,
        EventStatus::Ongoing => Color::Green,
        EventStatus::Completed => Color::BrightBlack,
        EventStatus::Cancelled => Color::Red,
    }
}

/// A month grid, one row per week starting on Sunday. Days with events are
/// starred.
#[derive(Debug)]
pub struct CalendarGrid<'a> {
    month: Month,
    cells: &'a [GridCell<'a, Event>],
}

impl<'a> CalendarGrid<'a> {
    const CELL_WIDTH: usize = 4;

    pub const fn new(month: Month, cells: &'a [GridCell<'a, Event>]) -> Self {
        Self { month, cells }
    }
}

impl fmt::Display for CalendarGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = WEEK_COLUMNS * Self::CELL_WIDTH;
        let title = self.month.first_day().format("%B %Y").to_string();
        writeln!(f, "{}", format!("{title:^width$}").bold())?;

        for name in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
            write!(f, "{name:>2}  ")?;
        }
        writeln!(f)?;

        for week in self.cells.chunks(WEEK_COLUMNS) {
            for cell in week {
                let Some(day) = cell.as_day() else {
                    f.write_str(&" ".repeat(Self::CELL_WIDTH))?;
                    continue;
                };

                let marker = if day.events.is_empty() { ' ' } else { '*' };
                let text = format!("{:>2}{marker} ", day.date.day());
                let mut styled = text.normal();
                if day.is_sunday {
                    styled = styled.red();
                }
                if !day.events.is_empty() {
                    styled = styled.yellow().bold();
                }
                if day.is_past {
                    styled = styled.dimmed();
                }
                write!(f, "{styled}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
