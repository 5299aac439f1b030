use chrono::{Datelike, Weekday};

use crate::{
    calendar::window::WindowKeys,
    utils::percentage::{count_percentage, Percentage},
};

use super::{record::AttendanceRecord, status::Status};

/// Share of eligible days that have to be attended.
pub const DEFAULT_THRESHOLD: f64 = 60.;

/// Rules attendance is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    pub threshold: Percentage,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            threshold: Percentage::new_opt(DEFAULT_THRESHOLD)
                .expect("Default threshold should be a valid percentage"),
        }
    }
}

fn is_weekday(record: &AttendanceRecord) -> bool {
    !matches!(record.date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays in the window that aren't spent working from home. Unset days count here.
pub fn eligible_days(records: &[AttendanceRecord], window: &WindowKeys) -> usize {
    records
        .iter()
        .filter(|record| {
            is_weekday(record)
                && record.status != Status::WorkFromHome
                && window.contains(record.date)
        })
        .count()
}

/// Days in the window marked Office, Leave or Holiday. The day of the week isn't checked.
pub fn attended_days(records: &[AttendanceRecord], window: &WindowKeys) -> usize {
    records
        .iter()
        .filter(|record| record.status.is_attended() && window.contains(record.date))
        .count()
}

/// Attended days out of eligible days. Zero when there are no eligible days.
pub fn percentage(records: &[AttendanceRecord], window: &WindowKeys) -> Percentage {
    count_percentage(
        attended_days(records, window),
        eligible_days(records, window),
    )
}

/// How many more days need to be attended to meet the policy threshold.
pub fn required_days_remaining(
    records: &[AttendanceRecord],
    window: &WindowKeys,
    policy: &AttendancePolicy,
) -> usize {
    let minimum_required = policy.threshold.of(eligible_days(records, window)).ceil() as usize;
    minimum_required.saturating_sub(attended_days(records, window))
}

pub fn days_with_status(records: &[AttendanceRecord], window: &WindowKeys, status: Status) -> usize {
    records
        .iter()
        .filter(|record| record.status == status && window.contains(record.date))
        .count()
}

/// Everything shown about the current window in one place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendanceSummary {
    pub percentage: Percentage,
    pub required_days: usize,
    pub eligible_days: usize,
    pub attended_days: usize,
    pub breakdown: Vec<(Status, usize)>,
}

impl AttendanceSummary {
    pub fn count_of(&self, status: Status) -> usize {
        self.breakdown
            .iter()
            .find(|(v, _)| *v == status)
            .map_or(0, |(_, count)| *count)
    }
}

/// Percentage, counts and breakdown are taken over `reporting`, required days over `required`.
/// The two windows differ by the Sunday at the start of `reporting`.
pub fn summarize(
    records: &[AttendanceRecord],
    reporting: &WindowKeys,
    required: &WindowKeys,
    policy: &AttendancePolicy,
) -> AttendanceSummary {
    AttendanceSummary {
        percentage: percentage(records, reporting),
        required_days: required_days_remaining(records, required, policy),
        eligible_days: eligible_days(records, reporting),
        attended_days: attended_days(records, reporting),
        breakdown: Status::ALL
            .into_iter()
            .map(|status| (status, days_with_status(records, reporting, status)))
            .collect(),
    }
}
