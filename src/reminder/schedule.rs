use chrono::{DateTime, Duration, Utc};
use now::DateTimeNow;

use crate::utils::time::tracker_offset;

/// A notification repeated every day at the same time of the tracker zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub identifier: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub hour: u32,
    pub minute: u32,
}

pub const DAILY_REMINDER: Reminder = Reminder {
    identifier: "AttendanceReminder",
    title: "Attendance Reminder",
    body: "Please mark your attendance for today.",
    hour: 17,
    minute: 0,
};

impl Reminder {
    /// First moment the reminder fires strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&tracker_offset());
        let fires_at = Duration::hours(self.hour as i64) + Duration::minutes(self.minute as i64);
        let mut next = local.beginning_of_day() + fires_at;
        if next <= local {
            next += Duration::days(1);
        }
        next.with_timezone(&Utc)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::DAILY_REMINDER;

    #[test]
    fn test_next_reminder_later_today() {
        // 09:00 at UTC+05:30
        let now = Utc.with_ymd_and_hms(2024, 10, 23, 3, 30, 0).unwrap();
        assert_eq!(
            DAILY_REMINDER.next_after(now),
            Utc.with_ymd_and_hms(2024, 10, 23, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_reminder_tomorrow() {
        // Exactly 17:00 at UTC+05:30, the reminder has just fired
        let now = Utc.with_ymd_and_hms(2024, 10, 23, 11, 30, 0).unwrap();
        assert_eq!(
            DAILY_REMINDER.next_after(now),
            Utc.with_ymd_and_hms(2024, 10, 24, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_reminder_uses_tracker_day() {
        // 20:00 UTC is already 01:30 of the 24th at UTC+05:30
        let now = Utc.with_ymd_and_hms(2024, 10, 23, 20, 0, 0).unwrap();
        assert_eq!(
            DAILY_REMINDER.next_after(now),
            Utc.with_ymd_and_hms(2024, 10, 24, 11, 30, 0).unwrap()
        );
    }
}
