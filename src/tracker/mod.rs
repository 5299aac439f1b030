//! Contains the attendance domain. [Tracker] is the main artifact of this module: it owns the
//! record store together with everything derived from it and is the only thing allowed to
//! change it.

pub mod aggregator;
pub mod record;
pub mod status;
pub mod store;

use aggregator::{summarize, AttendancePolicy, AttendanceSummary};
use chrono::NaiveDate;
use record::AttendanceRecord;
use status::Status;
use store::AttendanceStore;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    calendar::{
        month::{next_month, previous_month, MonthGrid},
        window::{
            display_window, reporting_window, required_days_window, storage_window,
            window_day_keys, DateWindow,
        },
    },
    storage::{
        key_value::KeyValueStore,
        records::{load_records, save_records},
    },
    utils::{clock::Clock, percentage::Percentage, time::tracker_date},
};

/// State container behind every view of the tracker.
pub struct Tracker {
    store: AttendanceStore,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    policy: AttendancePolicy,
    /// Month currently shown.
    current_date: NaiveDate,
    summary: AttendanceSummary,
}

impl Tracker {
    /// Loads stored records, lays them over the window ending this week and saves the result
    /// right away. Stored data that can't be read is treated as no data.
    #[instrument(skip_all)]
    pub async fn load(
        storage: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        policy: AttendancePolicy,
    ) -> Self {
        let today = tracker_date(clock.time());
        let mut tracker = Self {
            store: AttendanceStore::new(),
            storage,
            clock,
            policy,
            current_date: today,
            summary: AttendanceSummary::default(),
        };
        let prior = load_records(tracker.storage.as_ref()).await;
        tracker.regenerate(today, &prior).await;
        tracker
    }

    async fn regenerate(&mut self, today: NaiveDate, prior: &[AttendanceRecord]) {
        let window = storage_window(today);
        debug!(
            "Regenerating records from {} to {} with {} known",
            window.start,
            window.end,
            prior.len()
        );
        self.store.regenerate(window, prior);
        self.recalculate();
        self.persist().await;
    }

    /// Marks `date` with `status`. Days without a record are ignored and `false` is returned.
    #[instrument(skip(self))]
    pub async fn set_status(&mut self, date: NaiveDate, status: Status) -> bool {
        if !self.store.set_status(date, status) {
            warn!("No record for {date}, ignoring the update");
            return false;
        }
        info!("Marked {date} as {status}");
        self.recalculate();
        self.persist().await;
        true
    }

    fn recalculate(&mut self) {
        let today = self.today();
        self.summary = summarize(
            self.store.records(),
            &window_day_keys(&reporting_window(today)),
            &window_day_keys(&required_days_window(today)),
            &self.policy,
        );
        debug!(
            "Attendance {} with {} days required",
            self.summary.percentage, self.summary.required_days
        );
    }

    async fn persist(&self) {
        // The in-memory state stays usable even if it can't be saved.
        if let Err(e) = save_records(self.storage.as_ref(), self.store.records()).await {
            error!("Failed to save records {e:?}");
        }
    }

    pub fn today(&self) -> NaiveDate {
        tracker_date(self.clock.time())
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        self.store.records()
    }

    pub fn status_on(&self, date: NaiveDate) -> Option<Status> {
        self.store.status_on(date)
    }

    pub fn attendance_percentage(&self) -> Percentage {
        self.summary.percentage
    }

    pub fn required_days(&self) -> usize {
        self.summary.required_days
    }

    pub fn summary(&self) -> &AttendanceSummary {
        &self.summary
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Days the store currently has records for.
    pub fn tracked_window(&self) -> Option<DateWindow> {
        self.store.window()
    }

    pub fn reporting_window(&self) -> DateWindow {
        reporting_window(self.today())
    }

    /// Bounds shown to the user as the evaluated period.
    pub fn display_window(&self) -> DateWindow {
        display_window(self.today())
    }

    /// Any day of the month currently shown.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn show_next_month(&mut self) {
        self.current_date = next_month(self.current_date);
    }

    pub fn show_previous_month(&mut self) {
        self.current_date = previous_month(self.current_date);
    }

    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::for_month(self.current_date)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        calendar::window::storage_window,
        storage::{
            key_value::{FileKeyValueStore, MockKeyValueStore},
            records::{load_records, save_records},
        },
        utils::{clock::TestClock, logging::TEST_LOGGING},
    };

    use super::{aggregator::AttendancePolicy, record::AttendanceRecord, status::Status, Tracker};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Wednesday 23 October 2024, 10:00 at UTC+05:30
    fn test_clock() -> TestClock {
        TestClock::at(Utc.with_ymd_and_hms(2024, 10, 23, 4, 30, 0).unwrap())
    }

    async fn tracker_in(dir: &std::path::Path) -> Result<Tracker> {
        let storage = FileKeyValueStore::new(dir.to_owned())?;
        Ok(Tracker::load(
            Box::new(storage),
            Box::new(test_clock()),
            AttendancePolicy::default(),
        )
        .await)
    }

    #[tokio::test]
    async fn test_load_from_scratch() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let tracker = tracker_in(dir.path()).await?;

        let window = storage_window(date(2024, 10, 23));
        assert_eq!(tracker.records().len(), window.day_count());
        assert_eq!(tracker.today(), date(2024, 10, 23));
        assert_eq!(tracker.current_date(), date(2024, 10, 23));
        assert_eq!(*tracker.attendance_percentage(), 0.);
        // ceil(60 * 0.6), nothing attended yet
        assert_eq!(tracker.required_days(), 36);

        // Regenerated records are saved right away
        let storage = FileKeyValueStore::new(dir.path().to_owned())?;
        assert_eq!(load_records(&storage).await.len(), window.day_count());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_merges_stored_records() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileKeyValueStore::new(dir.path().to_owned())?;
        save_records(
            &storage,
            &[
                AttendanceRecord::new(date(2024, 1, 2), Status::Office),
                AttendanceRecord::new(date(2024, 10, 21), Status::Office),
                AttendanceRecord::new(date(2024, 10, 22), Status::WorkFromHome),
            ],
        )
        .await?;

        let tracker = tracker_in(dir.path()).await?;
        assert_eq!(tracker.status_on(date(2024, 10, 21)), Some(Status::Office));
        assert_eq!(tracker.status_on(date(2024, 10, 22)), Some(Status::WorkFromHome));
        assert_eq!(tracker.status_on(date(2024, 10, 23)), Some(Status::Unset));
        assert_eq!(tracker.status_on(date(2024, 1, 2)), None);
        assert_eq!(tracker.summary().eligible_days, 59);
        assert_eq!(tracker.summary().attended_days, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_recalculates_and_persists() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = tracker_in(dir.path()).await?;

        assert!(tracker.set_status(date(2024, 10, 21), Status::Office).await);
        assert!(tracker.set_status(date(2024, 10, 22), Status::Leave).await);
        assert_eq!(tracker.summary().attended_days, 2);
        assert_eq!(tracker.required_days(), 34);
        assert_eq!(tracker.attendance_percentage().rounded(2), 3.33);

        let reloaded = tracker_in(dir.path()).await?;
        assert_eq!(reloaded.status_on(date(2024, 10, 21)), Some(Status::Office));
        assert_eq!(reloaded.status_on(date(2024, 10, 22)), Some(Status::Leave));
        assert_eq!(reloaded.summary(), tracker.summary());
        Ok(())
    }

    /// Updates outside of the stored window are dropped without an error.
    #[tokio::test]
    async fn test_set_status_outside_window() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let mut tracker = tracker_in(dir.path()).await?;
        let before = tracker.records().to_vec();
        let summary = tracker.summary().clone();

        assert!(!tracker.set_status(date(2025, 1, 1), Status::Office).await);
        assert!(!tracker.set_status(date(2024, 7, 28), Status::Office).await);

        assert_eq!(tracker.records(), before.as_slice());
        assert_eq!(tracker.summary(), &summary);
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failures_are_swallowed() {
        *TEST_LOGGING;
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .returning(|_| Err(anyhow!("can't read")));
        storage
            .expect_set()
            .times(2)
            .returning(|_, _| Err(anyhow!("can't write")));

        let mut tracker = Tracker::load(
            Box::new(storage),
            Box::new(test_clock()),
            AttendancePolicy::default(),
        )
        .await;
        assert!(tracker.records().iter().all(|v| v.status == Status::Unset));

        assert!(tracker.set_status(date(2024, 10, 21), Status::Office).await);
        assert_eq!(tracker.status_on(date(2024, 10, 21)), Some(Status::Office));
        assert_eq!(tracker.summary().attended_days, 1);
    }

    /// A load in a later week moves the window forward, keeping the days still inside it.
    #[tokio::test]
    async fn test_load_in_next_week_moves_window() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = tracker_in(dir.path()).await?;
        assert!(tracker.set_status(date(2024, 7, 29), Status::Office).await);
        assert!(tracker.set_status(date(2024, 10, 21), Status::Office).await);

        // Wednesday 30 October 2024
        let clock = TestClock::at(Utc.with_ymd_and_hms(2024, 10, 30, 4, 30, 0).unwrap());
        let storage = FileKeyValueStore::new(dir.path().to_owned())?;
        let reloaded =
            Tracker::load(Box::new(storage), Box::new(clock), AttendancePolicy::default()).await;

        assert_eq!(
            reloaded.tracked_window(),
            Some(storage_window(date(2024, 10, 30)))
        );
        assert_eq!(reloaded.status_on(date(2024, 7, 29)), None);
        assert_eq!(reloaded.status_on(date(2024, 10, 21)), Some(Status::Office));
        assert_eq!(reloaded.status_on(date(2024, 11, 1)), Some(Status::Unset));
        Ok(())
    }

    #[tokio::test]
    async fn test_month_navigation() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = tracker_in(dir.path()).await?;

        tracker.show_next_month();
        assert_eq!(tracker.month_grid().title, "November 2024");
        tracker.show_previous_month();
        tracker.show_previous_month();
        assert_eq!(tracker.month_grid().title, "September 2024");
        tracker.show_month_of(date(2023, 2, 14));
        assert_eq!(tracker.month_grid().days.len(), 28);
        Ok(())
    }
}
