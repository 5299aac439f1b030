use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Offset of UTC+05:30 in seconds.
const TRACKER_OFFSET_SECONDS: i32 = 5 * 60 * 60 + 30 * 60;

/// Every calendar computation in the tracker happens in this zone, no matter what the machine's
/// local time zone is. Keeping it fixed makes "the current window" the same for every user.
pub fn tracker_offset() -> FixedOffset {
    FixedOffset::east_opt(TRACKER_OFFSET_SECONDS).expect("UTC+05:30 is always a valid offset")
}

/// Calendar day of `moment` in the tracker zone.
pub fn tracker_date(moment: DateTime<Utc>) -> NaiveDate {
    moment.with_timezone(&tracker_offset()).date_naive()
}

/// Midnight of `date` in the tracker zone, expressed in UTC.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    (date.and_time(NaiveTime::MIN) - Duration::seconds(TRACKER_OFFSET_SECONDS as i64)).and_utc()
}

/// This is the standard way of converting a date to a comparable key, e.g. `05 Oct 2024`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Long form used when showing window bounds, e.g. `05 October 2024`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Title of a month view, e.g. `October 2024`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
