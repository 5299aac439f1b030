//! Calendar arithmetic behind the tracker.
//!
//!  - [window] derives the reporting windows from "today" and enumerates their days.
//!  - [month] lays out a single month for the calendar view.
//!
//! Dates here are plain [chrono::NaiveDate]s that were already taken in the tracker zone (see
//! [crate::utils::time::tracker_offset]), so nothing in this module depends on the machine's
//! time zone.

pub mod month;
pub mod window;
