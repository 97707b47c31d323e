// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Month calendar grid and date-range membership.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::types::ParseError;

/// Columns of the calendar grid, the week starts on Sunday.
pub const WEEK_COLUMNS: usize = 7;

/// Something that is active over a range of days.
pub trait Dated {
    /// First active day.
    fn start_date(&self) -> NaiveDate;

    /// Last active day, `None` for a single-day record.
    fn end_date(&self) -> Option<NaiveDate>;

    /// The closed interval of active days.
    fn span(&self) -> DateSpan {
        let start = self.start_date();
        DateSpan::new(start, self.end_date().unwrap_or(start))
    }
}

/// The position of a date relative to a closed date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The date is before the start of the range.
    Before,

    /// The date is within the range.
    InRange,

    /// The date is after the end of the range.
    After,

    /// The range is invalid, its end is before its start.
    InvalidRange,
}

/// A closed interval of days, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    /// First day.
    pub start: NaiveDate,

    /// Last day.
    pub end: NaiveDate,
}

impl DateSpan {
    /// Creates a span; an inverted span contains no day.
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A span covering a single day.
    pub const fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether the end is not before the start.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Where `date` lies relative to this span.
    pub fn position(&self, date: NaiveDate) -> RangePosition {
        if !self.is_valid() {
            RangePosition::InvalidRange
        } else if date < self.start {
            RangePosition::Before
        } else if date > self.end {
            RangePosition::After
        } else {
            RangePosition::InRange
        }
    }

    /// Whether the span contains `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date) == RangePosition::InRange
    }

    /// Whether both spans share at least one day.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.is_valid() && other.is_valid() && self.start <= other.end && other.start <= self.end
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// The month with the given year and month number (1-12).
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The year of the month.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month number, 1-12.
    pub fn number(&self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    pub const fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The month as a closed span of days.
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.first_day(), self.last_day())
    }

    /// Number of days in the month.
    pub fn len(&self) -> u32 {
        self.last_day().day()
    }

    /// The following month.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }

    /// The preceding month.
    #[must_use]
    pub fn prev(&self) -> Self {
        Self(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    /// Every day of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last_day();
        self.0.iter_days().take_while(move |d| *d <= last)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.number())
    }
}

impl FromStr for Month {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Month(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// One day of the month grid.
#[derive(Debug, Clone)]
pub struct DayCell<'a, E> {
    /// The day.
    pub date: NaiveDate,

    /// Strictly before today; today itself is not past.
    pub is_past: bool,

    /// The day is a Sunday.
    pub is_sunday: bool,

    /// Records active on this day, in input order.
    pub events: Vec<&'a E>,
}

/// A cell of the seven-column month grid.
#[derive(Debug, Clone)]
pub enum GridCell<'a, E> {
    /// Leading filler before the first day of the month.
    Placeholder,

    /// A real day.
    Day(DayCell<'a, E>),
}

impl<'a, E> GridCell<'a, E> {
    /// The day, unless this is a placeholder.
    pub const fn as_day(&self) -> Option<&DayCell<'a, E>> {
        match self {
            GridCell::Placeholder => None,
            GridCell::Day(day) => Some(day),
        }
    }
}

/// Builds the grid for `month`: placeholders aligning day one to its weekday
/// column, then one cell per day with the records whose span contains it.
///
/// `today` decides which days are in the past.
pub fn days_in_month<E: Dated>(month: Month, today: NaiveDate, events: &[E]) -> Vec<GridCell<'_, E>> {
    let offset = month.first_day().weekday().num_days_from_sunday() as usize;
    let spans: Vec<DateSpan> = events.iter().map(Dated::span).collect();
    for span in spans.iter().filter(|s| !s.is_valid()) {
        tracing::warn!(start = %span.start, end = %span.end, "record ends before it starts, not shown on the grid");
    }

    let mut cells = Vec::with_capacity(offset + month.len() as usize);
    cells.extend((0..offset).map(|_| GridCell::Placeholder));
    cells.extend(month.days().map(|date| {
        let events = events
            .iter()
            .zip(&spans)
            .filter(|(_, span)| span.contains(date))
            .map(|(e, _)| e)
            .collect();

        GridCell::Day(DayCell {
            date,
            is_past: date < today,
            is_sunday: date.weekday() == Weekday::Sun,
            events,
        })
    }));
    cells
}

/// Records active at some point during `month`: starting in it, ending in it,
/// or spanning all of it. Input order is kept.
pub fn monthly_filter<E: Dated>(month: Month, events: &[E]) -> Vec<&E> {
    let bounds = month.span();
    events
        .iter()
        .filter(|e| {
            let span = e.span();
            bounds.contains(span.start)
                || bounds.contains(span.end)
                || (span.start < bounds.start && span.end > bounds.end)
        })
        .collect()
}

/// Orders records by ascending start date. Records starting on the same day
/// keep their relative order.
pub fn sort_by_start<E: Dated>(events: &mut [&E]) {
    events.sort_by_key(|e| e.start_date());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    }

    impl Dated for Item {
        fn start_date(&self) -> NaiveDate {
            self.start
        }

        fn end_date(&self) -> Option<NaiveDate> {
            self.end
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(name: &'static str, start: NaiveDate, end: Option<NaiveDate>) -> Item {
        Item { name, start, end }
    }

    fn days<'a>(cells: &'a [GridCell<'a, Item>]) -> Vec<&'a DayCell<'a, Item>> {
        cells.iter().filter_map(GridCell::as_day).collect()
    }

    #[test]
    fn parses_and_formats_months() {
        let month: Month = "2025-03".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.number(), 3);
        assert_eq!(month.to_string(), "2025-03");
        assert_eq!(month.first_day(), date(2025, 3, 1));
        assert_eq!(month.last_day(), date(2025, 3, 31));

        assert!("2025-13".parse::<Month>().is_err());
        assert!("2025".parse::<Month>().is_err());
        assert!("March".parse::<Month>().is_err());
    }

    #[test]
    fn navigates_across_year_boundaries() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(Month::containing(date(2024, 2, 17)).len(), 29);
        assert_eq!(Month::new(2025, 2).unwrap().len(), 28);
    }

    #[test]
    fn span_positions() {
        let span = DateSpan::new(date(2025, 1, 10), date(2025, 1, 12));
        assert_eq!(span.position(date(2025, 1, 9)), RangePosition::Before);
        assert_eq!(span.position(date(2025, 1, 10)), RangePosition::InRange);
        assert_eq!(span.position(date(2025, 1, 12)), RangePosition::InRange);
        assert_eq!(span.position(date(2025, 1, 13)), RangePosition::After);

        let inverted = DateSpan::new(date(2025, 1, 12), date(2025, 1, 10));
        assert_eq!(inverted.position(date(2025, 1, 11)), RangePosition::InvalidRange);
        assert!(!inverted.contains(date(2025, 1, 11)));
        assert!(!inverted.overlaps(&span));

        assert!(span.overlaps(&DateSpan::day(date(2025, 1, 12))));
        assert!(!span.overlaps(&DateSpan::day(date(2025, 1, 13))));
    }

    #[test]
    fn grid_aligns_first_day_to_its_weekday() {
        // 2025-01-01 is a Wednesday
        let month = Month::new(2025, 1).unwrap();
        let cells = days_in_month::<Item>(month, date(2025, 1, 1), &[]);
        assert_eq!(cells.len(), 3 + 31);
        assert!(cells.iter().take(3).all(|c| c.as_day().is_none()));
        let first = cells.get(3).and_then(GridCell::as_day).unwrap();
        assert_eq!(first.date, date(2025, 1, 1));
        assert!(cells.len() <= WEEK_COLUMNS * 6);

        // 2025-06-01 is a Sunday, no placeholders
        let cells = days_in_month::<Item>(Month::new(2025, 6).unwrap(), date(2025, 1, 1), &[]);
        assert_eq!(cells.len(), 30);
        assert!(cells.first().and_then(GridCell::as_day).unwrap().is_sunday);
    }

    #[test]
    fn grid_days_ascend_and_flag_past_and_sundays() {
        let month = Month::new(2025, 1).unwrap();
        let today = date(2025, 1, 15);
        let cells = days_in_month::<Item>(month, today, &[]);
        let days = days(&cells);

        assert!(days.iter().zip(days.iter().skip(1)).all(|(a, b)| a.date < b.date));
        for day in &days {
            assert_eq!(day.is_past, day.date < today);
            assert_eq!(day.is_sunday, day.date.weekday() == Weekday::Sun);
        }
        let today_cell = days.iter().find(|d| d.date == today).unwrap();
        assert!(!today_cell.is_past);
        assert_eq!(days.iter().filter(|d| d.is_sunday).count(), 4);
    }

    #[test]
    fn grid_marks_every_day_of_a_span_and_nothing_else() {
        let events = vec![item("fair", date(2025, 1, 30), Some(date(2025, 2, 3)))];
        let span = events.first().unwrap().span();
        for month in [Month::new(2025, 1).unwrap(), Month::new(2025, 2).unwrap()] {
            let cells = days_in_month(month, date(2025, 1, 1), &events);
            for day in days(&cells) {
                assert_eq!(day.events.len() == 1, span.contains(day.date), "{}", day.date);
            }
        }
    }

    #[test]
    fn grid_marks_only_start_day_without_end() {
        let events = vec![item("assembly", date(2025, 1, 8), None)];
        let cells = days_in_month(Month::new(2025, 1).unwrap(), date(2025, 1, 1), &events);
        let marked: Vec<_> = days(&cells)
            .into_iter()
            .filter(|d| !d.events.is_empty())
            .map(|d| d.date)
            .collect();
        assert_eq!(marked, vec![date(2025, 1, 8)]);
    }

    #[test]
    fn grid_is_deterministic() {
        let events = vec![
            item("a", date(2025, 1, 2), Some(date(2025, 1, 4))),
            item("b", date(2025, 1, 3), None),
        ];
        let month = Month::new(2025, 1).unwrap();
        let collect = || {
            days(&days_in_month(month, date(2025, 1, 3), &events))
                .iter()
                .map(|d| (d.date, d.is_past, d.events.iter().map(|e| e.name).collect::<Vec<_>>()))
                .collect::<Vec<_>>()
        };
        assert_eq!(collect(), collect());
    }

    #[test]
    fn monthly_filter_keeps_overlapping_events() {
        let events = vec![
            item("starts-in", date(2025, 3, 28), Some(date(2025, 4, 2))),
            item("ends-in", date(2025, 2, 20), Some(date(2025, 3, 1))),
            item("spans", date(2025, 2, 1), Some(date(2025, 4, 30))),
            item("single", date(2025, 3, 15), None),
            item("before", date(2025, 2, 1), Some(date(2025, 2, 28))),
            item("after", date(2025, 4, 1), None),
        ];
        let names: Vec<_> = monthly_filter(Month::new(2025, 3).unwrap(), &events)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["starts-in", "ends-in", "spans", "single"]);
    }

    #[test]
    fn sorts_by_start_keeping_ties_in_order() {
        let events = vec![
            item("late", date(2025, 3, 20), None),
            item("early-a", date(2025, 3, 2), None),
            item("early-b", date(2025, 3, 2), Some(date(2025, 3, 4))),
            item("middle", date(2025, 3, 9), None),
        ];
        let mut refs: Vec<&Item> = events.iter().collect();
        sort_by_start(&mut refs);
        let names: Vec<_> = refs.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["early-a", "early-b", "middle", "late"]);
    }
}
