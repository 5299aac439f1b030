use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::window::DateWindow;

use super::{record::AttendanceRecord, status::Status};

/// Ordered list of records covering a contiguous run of days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceStore {
    records: Vec<AttendanceRecord>,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the records with one record per day of `window`. Statuses known from `prior` are
    /// carried over, the rest of the days start as [Status::Unset]. Prior records outside the
    /// window are dropped.
    pub fn regenerate(&mut self, window: DateWindow, prior: &[AttendanceRecord]) {
        let mut known = HashMap::<NaiveDate, Status>::with_capacity(prior.len());
        for record in prior {
            // First record for a day wins
            known.entry(record.date).or_insert(record.status);
        }

        self.records = window
            .days()
            .map(|date| AttendanceRecord::new(date, known.get(&date).copied().unwrap_or_default()))
            .collect();
    }

    /// Status of `date`, if the store has a record for it.
    pub fn status_on(&self, date: NaiveDate) -> Option<Status> {
        self.position(date).map(|index| self.records[index].status)
    }

    /// Overwrites the status of `date`. When there is no record for that day nothing changes and
    /// `false` is returned.
    pub fn set_status(&mut self, date: NaiveDate, status: Status) -> bool {
        match self.position(date) {
            Some(index) => {
                self.records[index].status = status;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Days currently covered by the store.
    pub fn window(&self) -> Option<DateWindow> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some(DateWindow::new(first.date, last.date)),
            _ => None,
        }
    }

    fn position(&self, date: NaiveDate) -> Option<usize> {
        // Records are always sorted by date without duplicates
        self.records
            .binary_search_by_key(&date, |record| record.date)
            .ok()
    }
}
