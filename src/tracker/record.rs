use chrono::NaiveDate;

use super::status::Status;

/// Status of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub status: Status,
}

impl AttendanceRecord {
    pub fn new(date: NaiveDate, status: Status) -> Self {
        Self { date, status }
    }

    pub fn unset(date: NaiveDate) -> Self {
        Self::new(date, Status::Unset)
    }
}
