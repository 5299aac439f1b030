use chrono::{Datelike, Months, NaiveDate};

use crate::utils::time::month_title;

use super::window::enumerate_days;

const DAYS_IN_WEEK: usize = 7;

pub fn first_day_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor
        .with_day(1)
        .expect("Every month should have a first day")
}

/// First day of the month after `anchor`'s.
pub fn next_month(anchor: NaiveDate) -> NaiveDate {
    first_day_of_month(anchor)
        .checked_add_months(Months::new(1))
        .expect("End of time should never happen")
}

/// First day of the month before `anchor`'s.
pub fn previous_month(anchor: NaiveDate) -> NaiveDate {
    first_day_of_month(anchor)
        .checked_sub_months(Months::new(1))
        .expect("Beginning of time should never happen")
}

/// All days of the month `anchor` belongs to.
pub fn month_days(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = first_day_of_month(anchor);
    let last = next_month(anchor)
        .pred_opt()
        .expect("Beginning of time should never happen");
    enumerate_days(first, last).collect()
}

/// Amount of empty cells before the first day of the month. Weeks start on Sunday, which is
/// column 0.
pub fn leading_blank_count(anchor: NaiveDate) -> usize {
    first_day_of_month(anchor).weekday().num_days_from_sunday() as usize
}

/// Layout of a month for a Sunday-first calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub title: String,
    pub leading_blanks: usize,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    pub fn for_month(anchor: NaiveDate) -> Self {
        Self {
            title: month_title(anchor),
            leading_blanks: leading_blank_count(anchor),
            days: month_days(anchor),
        }
    }

    /// Rows of the calendar. Cells before the first and after the last day are [None].
    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        let cells = std::iter::repeat(None)
            .take(self.leading_blanks)
            .chain(self.days.iter().copied().map(Some))
            .collect::<Vec<_>>();

        cells
            .chunks(DAYS_IN_WEEK)
            .map(|week| {
                let mut week = week.to_vec();
                week.resize(DAYS_IN_WEEK, None);
                week
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{leading_blank_count, month_days, next_month, previous_month, MonthGrid};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_days() {
        let days = month_days(date(2024, 2, 17));
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&date(2024, 2, 1)));
        assert_eq!(days.last(), Some(&date(2024, 2, 29)));

        assert_eq!(month_days(date(2023, 2, 1)).len(), 28);
        assert_eq!(month_days(date(2024, 12, 31)).len(), 31);
    }

    #[test]
    fn test_leading_blank_count() {
        // 1 September 2024 is a Sunday
        assert_eq!(leading_blank_count(date(2024, 9, 15)), 0);
        // 1 October 2024 is a Tuesday
        assert_eq!(leading_blank_count(date(2024, 10, 31)), 2);
        // 1 June 2024 is a Saturday
        assert_eq!(leading_blank_count(date(2024, 6, 1)), 6);
    }

    #[test]
    fn test_month_navigation() {
        assert_eq!(next_month(date(2024, 1, 31)), date(2024, 2, 1));
        assert_eq!(next_month(date(2024, 12, 5)), date(2025, 1, 1));
        assert_eq!(previous_month(date(2024, 3, 31)), date(2024, 2, 1));
        assert_eq!(previous_month(date(2024, 1, 1)), date(2023, 12, 1));
    }

    #[test]
    fn test_month_grid_weeks() {
        let grid = MonthGrid::for_month(date(2024, 6, 10));
        assert_eq!(grid.title, "June 2024");
        let weeks = grid.weeks();
        // 6 blanks + 30 days spill into a sixth row
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|week| week.len() == 7));
        assert_eq!(weeks[0][5], None);
        assert_eq!(weeks[0][6], Some(date(2024, 6, 1)));
        assert_eq!(weeks[5][0], Some(date(2024, 6, 30)));
        assert_eq!(weeks[5][1], None);
    }
}
