//! Personal attendance tracker. Days are marked as office, work from home, leave or holiday and
//! attendance is evaluated over a rolling 12 week period against a 60% policy. Everything is
//! stored locally, and a small background process reminds to fill in the day.
//!

pub mod calendar;
pub mod cli;
pub mod fs;
pub mod reminder;
pub mod storage;
pub mod tracker;
pub mod utils;
