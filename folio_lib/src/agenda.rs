//! Calendar grid for the bookings agenda.
//!
//! Computes the dates a week or month view shows and drops each booking
//! into the cell of the day its `start_time` names. Placement is textual:
//! the first ten characters of the timestamp are compared with the cell's
//! `YYYY-MM-DD`, with no timezone conversion.

use std::str::FromStr;

use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use folio_api::types::Booking;

use crate::error::FolioError;

/// Which grid the agenda shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Monday through Sunday.
    #[default]
    Week,
    /// Day 1 through the last day of the month.
    Month,
}

impl FromStr for ViewMode {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(ViewMode::Week),
            "month" | "m" => Ok(ViewMode::Month),
            _ => Err(FolioError::InvalidInput(format!(
                "unknown view mode '{}', expected week or month",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Week => write!(f, "week"),
            ViewMode::Month => write!(f, "month"),
        }
    }
}

/// Anything with a textual start timestamp can be placed on the grid.
pub trait Scheduled {
    fn start_time(&self) -> &str;
}

impl Scheduled for Booking {
    fn start_time(&self) -> &str {
        &self.start_time
    }
}

/// One day of the grid and the items starting on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a, T> {
    pub date: NaiveDate,
    pub items: Vec<&'a T>,
}

impl<'a, T> DayCell<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
        .unwrap_or(NaiveDate::MIN)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // Only the last representable month has no successor, and it is a December.
        None => 31,
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date - Duration::days(date.day0() as i64)
}

/// Dates shown by `mode` around `reference`, in calendar order.
///
/// Near the edges of the supported calendar the grid is cut short rather
/// than wrapping.
pub fn visible_dates(reference: NaiveDate, mode: ViewMode) -> Vec<NaiveDate> {
    let (start, len) = match mode {
        ViewMode::Week => (week_start(reference), 7),
        ViewMode::Month => (first_of_month(reference), days_in_month(reference) as u64),
    };
    (0..len)
        .map_while(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

/// Moves `reference` by `steps` periods (negative goes back).
///
/// Week mode moves 7 days per step. Month mode keeps the day of month and
/// lets it overflow into the following month when the target month is
/// shorter, so Jan 31 + 1 month is Mar 2 (leap year) or Mar 3.
///
/// Fails with [`FolioError::InvalidInput`] when the result falls outside
/// the supported calendar.
pub fn shift(reference: NaiveDate, mode: ViewMode, steps: i32) -> Result<NaiveDate, FolioError> {
    let shifted = match mode {
        ViewMode::Week => reference.checked_add_signed(Duration::days(7 * steps as i64)),
        ViewMode::Month => {
            let first = first_of_month(reference);
            let target = if steps >= 0 {
                first.checked_add_months(Months::new(steps as u32))
            } else {
                first.checked_sub_months(Months::new(steps.unsigned_abs()))
            };
            target.and_then(|t| t.checked_add_days(Days::new(reference.day0() as u64)))
        }
    };
    shifted.ok_or_else(|| {
        FolioError::InvalidInput(format!(
            "cannot move {} {}s from {}: date out of range",
            steps, mode, reference
        ))
    })
}

/// Places each item on the date its start timestamp names.
///
/// Items whose date falls outside `dates` are left out. Within a cell the
/// input order is kept.
pub fn bucket<'a, T: Scheduled>(dates: &[NaiveDate], items: &'a [T]) -> Vec<DayCell<'a, T>> {
    dates
        .iter()
        .map(|date| {
            let key = date.format("%Y-%m-%d").to_string();
            DayCell {
                date: *date,
                items: items
                    .iter()
                    .filter(|item| date_prefix(item.start_time()) == Some(key.as_str()))
                    .collect(),
            }
        })
        .collect()
}

/// Computes the grid for `mode` around `reference` and fills it.
pub fn build_grid<'a, T: Scheduled>(
    reference: NaiveDate,
    mode: ViewMode,
    items: &'a [T],
) -> Vec<DayCell<'a, T>> {
    bucket(&visible_dates(reference, mode), items)
}

/// Sorts items by start timestamp, ascending. Ties keep their input order.
pub fn sort_by_start<T: Scheduled>(items: &mut [&T]) {
    items.sort_by(|a, b| a.start_time().cmp(b.start_time()));
}

/// Heading for the grid, e.g. "Mar 11 - Mar 17, 2024" or "March 2024".
pub fn period_label(reference: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Week => {
            let start = week_start(reference);
            let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        ViewMode::Month => reference.format("%B %Y").to_string(),
    }
}

fn date_prefix(timestamp: &str) -> Option<&str> {
    timestamp.get(..10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    struct Slot(&'static str);

    impl Scheduled for Slot {
        fn start_time(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn week_starts_monday_and_spans_seven_days() {
        let mut date = make_date(2023, 12, 20);
        for _ in 0..60 {
            let dates = visible_dates(date, ViewMode::Week);
            assert_eq!(dates.len(), 7);
            assert_eq!(dates[0].weekday(), Weekday::Mon);
            assert!(dates.contains(&date));
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            date = date + Duration::days(1);
        }
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let sunday = make_date(2024, 3, 17);
        assert_eq!(week_start(sunday), make_date(2024, 3, 11));
    }

    #[test]
    fn month_covers_every_day() {
        let cases = [
            (make_date(2024, 2, 14), 29),
            (make_date(2023, 2, 1), 28),
            (make_date(2024, 4, 30), 30),
            (make_date(2024, 12, 31), 31),
        ];
        for (reference, expected) in cases {
            let dates = visible_dates(reference, ViewMode::Month);
            assert_eq!(dates.len(), expected);
            assert_eq!(dates[0].day(), 1);
            assert_eq!(dates[0].month(), reference.month());
            assert_eq!(dates.last().unwrap().month(), reference.month());
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }

    #[test]
    fn thursday_week_example() {
        let bookings = [Slot("2024-03-15T09:00:00Z"), Slot("2024-03-16T14:30:00Z")];
        let grid = build_grid(make_date(2024, 3, 14), ViewMode::Week, &bookings);

        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].date, make_date(2024, 3, 11));
        assert_eq!(grid[6].date, make_date(2024, 3, 17));
        for cell in &grid {
            match cell.date.day() {
                15 => assert_eq!(cell.items.len(), 1),
                16 => assert_eq!(cell.items.len(), 1),
                _ => assert!(cell.is_empty()),
            }
        }
        assert_eq!(grid[4].items[0].0, "2024-03-15T09:00:00Z");
        assert_eq!(grid[5].items[0].0, "2024-03-16T14:30:00Z");
    }

    #[test]
    fn booking_lands_in_exactly_one_cell_in_either_mode() {
        let bookings = [Slot("2024-03-15T09:00:00Z")];
        for mode in [ViewMode::Week, ViewMode::Month] {
            let grid = build_grid(make_date(2024, 3, 15), mode, &bookings);
            let hits: Vec<_> = grid.iter().filter(|c| !c.is_empty()).collect();
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].date, make_date(2024, 3, 15));
        }
    }

    #[test]
    fn matching_ignores_timezone_offsets() {
        // 23:30 at -05:00 is the 16th in UTC, but the textual date wins.
        let bookings = [Slot("2024-03-15T23:30:00-05:00")];
        let grid = build_grid(make_date(2024, 3, 15), ViewMode::Week, &bookings);
        let cell = grid.iter().find(|c| !c.is_empty()).unwrap();
        assert_eq!(cell.date, make_date(2024, 3, 15));
    }

    #[test]
    fn out_of_range_and_short_timestamps_are_dropped() {
        let bookings = [Slot("2024-04-01T09:00:00Z"), Slot("2024-03"), Slot("")];
        let grid = build_grid(make_date(2024, 3, 14), ViewMode::Month, &bookings);
        assert!(grid.iter().all(|c| c.is_empty()));
    }

    #[test]
    fn cells_keep_input_order_and_sorting_is_stable() {
        let bookings = [
            Slot("2024-03-15T14:00:00Z"),
            Slot("2024-03-15T09:00:00Z"),
            Slot("2024-03-15T14:00:00Z"),
        ];
        let grid = build_grid(make_date(2024, 3, 15), ViewMode::Week, &bookings);
        let mut cell = grid.into_iter().find(|c| !c.is_empty()).unwrap();
        assert!(std::ptr::eq(cell.items[0], &bookings[0]));

        sort_by_start(&mut cell.items);
        assert!(std::ptr::eq(cell.items[0], &bookings[1]));
        assert!(std::ptr::eq(cell.items[1], &bookings[0]));
        assert!(std::ptr::eq(cell.items[2], &bookings[2]));
    }

    #[test]
    fn week_navigation_moves_seven_days() {
        let d = make_date(2024, 3, 14);
        assert_eq!(shift(d, ViewMode::Week, 1).unwrap(), make_date(2024, 3, 21));
        assert_eq!(shift(d, ViewMode::Week, -1).unwrap(), make_date(2024, 3, 7));
        assert_eq!(shift(d, ViewMode::Week, 0).unwrap(), d);
    }

    #[test]
    fn month_navigation_keeps_day_or_rolls_over() {
        assert_eq!(
            shift(make_date(2024, 3, 15), ViewMode::Month, 1).unwrap(),
            make_date(2024, 4, 15)
        );
        assert_eq!(
            shift(make_date(2024, 1, 15), ViewMode::Month, -1).unwrap(),
            make_date(2023, 12, 15)
        );
        assert_eq!(
            shift(make_date(2023, 1, 31), ViewMode::Month, 1).unwrap(),
            make_date(2023, 3, 3)
        );
        assert_eq!(
            shift(make_date(2024, 1, 31), ViewMode::Month, 1).unwrap(),
            make_date(2024, 3, 2)
        );
        assert_eq!(
            shift(make_date(2024, 3, 31), ViewMode::Month, -1).unwrap(),
            make_date(2024, 3, 2)
        );
        assert_eq!(
            shift(make_date(2024, 5, 10), ViewMode::Month, 12).unwrap(),
            make_date(2025, 5, 10)
        );
    }

    #[test]
    fn navigation_past_the_calendar_edge_is_an_error() {
        let d = make_date(2024, 3, 14);
        for (mode, steps) in [
            (ViewMode::Week, 100_000_000),
            (ViewMode::Week, i32::MIN),
            (ViewMode::Month, i32::MAX),
            (ViewMode::Month, -100_000_000),
        ] {
            let err = shift(d, mode, steps).unwrap_err();
            assert!(matches!(err, FolioError::InvalidInput(_)), "{} {}", mode, steps);
        }
    }

    #[test]
    fn grid_at_the_calendar_edge_does_not_panic() {
        let last = visible_dates(NaiveDate::MAX, ViewMode::Week);
        assert_eq!(last.last(), Some(&NaiveDate::MAX));
        assert!(last.len() <= 7);

        let month = visible_dates(NaiveDate::MAX, ViewMode::Month);
        assert_eq!(month.len(), 31);
        assert_eq!(week_start(NaiveDate::MIN), NaiveDate::MIN);
        assert!(period_label(NaiveDate::MAX, ViewMode::Week).contains(" - "));
    }

    #[test]
    fn view_mode_parsing() {
        assert_eq!("week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!("Month".parse::<ViewMode>().unwrap(), ViewMode::Month);
        assert!("year".parse::<ViewMode>().is_err());
    }

    #[test]
    fn labels() {
        let d = make_date(2024, 3, 14);
        assert_eq!(period_label(d, ViewMode::Week), "Mar 11 - Mar 17, 2024");
        assert_eq!(period_label(d, ViewMode::Month), "March 2024");
    }
}
