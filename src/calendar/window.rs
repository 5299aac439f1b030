use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::utils::time::day_key;

/// Length of the period attendance is evaluated over.
pub const REPORTING_WEEKS: i64 = 12;

/// The store keeps one more week than it reports on so that both reporting windows are always
/// covered by records.
const STORAGE_WEEKS: i64 = REPORTING_WEEKS + 1;

/// Closed range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        enumerate_days(self.start, self.end)
    }

    /// Number of days including both ends. Zero if the window is inverted.
    pub fn day_count(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Friday of the Monday to Sunday week `reference` belongs to. For Monday through Thursday this
/// is the upcoming Friday, for the weekend it's the day(s) before.
pub fn most_recent_friday(reference: NaiveDate) -> NaiveDate {
    let days_to_friday = match reference.weekday() {
        Weekday::Mon => 4,
        Weekday::Tue => 3,
        Weekday::Wed => 2,
        Weekday::Thu => 1,
        Weekday::Fri => 0,
        Weekday::Sat => -1,
        Weekday::Sun => -2,
    };
    reference + Duration::days(days_to_friday)
}

/// Friday strictly before `reference`.
pub fn prior_friday(reference: NaiveDate) -> NaiveDate {
    let days_since_friday = match reference.weekday() {
        Weekday::Mon => 3,
        Weekday::Tue => 4,
        Weekday::Wed => 5,
        Weekday::Thu => 6,
        Weekday::Fri => 7,
        Weekday::Sat => 8,
        Weekday::Sun => 9,
    };
    reference - Duration::days(days_since_friday)
}

/// Window the attendance percentage is computed over. It starts on the Sunday after the Friday
/// twelve weeks back, so it spans 83 days.
pub fn reporting_window(reference: NaiveDate) -> DateWindow {
    let end = most_recent_friday(reference);
    let start = end - Duration::weeks(REPORTING_WEEKS) + Duration::days(2);
    DateWindow::new(start, end)
}

/// Window the remaining required days are computed over. Same end as [reporting_window] but it
/// starts on the Monday, one day later.
pub fn required_days_window(reference: NaiveDate) -> DateWindow {
    let end = most_recent_friday(reference);
    let start = end - Duration::weeks(REPORTING_WEEKS) + Duration::days(3);
    DateWindow::new(start, end)
}

/// Window the store keeps records for, from the Monday thirteen weeks back.
pub fn storage_window(reference: NaiveDate) -> DateWindow {
    let end = most_recent_friday(reference);
    let start = end - Duration::weeks(STORAGE_WEEKS) + Duration::days(3);
    DateWindow::new(start, end)
}

/// Bounds shown to the user as the evaluated period. Those end on the last completed Friday.
pub fn display_window(reference: NaiveDate) -> DateWindow {
    let end = prior_friday(reference);
    let start = end - Duration::weeks(REPORTING_WEEKS) + Duration::days(3);
    DateWindow::new(start, end)
}

/// Returns dates between start (inclusive) and end (inclusive). Stepping is done in whole
/// calendar days so there are no surprises around offsets.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Set of day keys (see [day_key]) belonging to a window. Membership checks go through the
/// formatted day, so two values representing the same calendar day always match.
#[derive(Debug, Clone, Default)]
pub struct WindowKeys(HashSet<String>);

impl WindowKeys {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&day_key(date))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn window_day_keys(window: &DateWindow) -> WindowKeys {
    WindowKeys(window.days().map(day_key).collect())
}
