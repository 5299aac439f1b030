use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{
    tracker::{status::Status, Tracker},
    utils::time::{long_date, tracker_offset},
};

use super::{calendar_view::print_attendance, Args};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct MarkCommand {
    #[arg(help = "Day to mark. Examples are \"today\", \"yesterday\", \"last friday\", \"2024-10-21\", \"21/10/2024\"")]
    date: String,
    #[arg(help = "One of office (o), wfh (w), leave (l), holiday (h), unset (u)")]
    status: Status,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Parses a day given on the command line. The day is taken in the tracker zone, so "today"
/// means the same day for everyone.
pub fn parse_day(input: &str, now: DateTime<Utc>, date_style: DateStyle) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    let now = now.with_timezone(&tracker_offset());
    match parse_date_string(input, now, date_style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input}: {e}"),
            )
            .into()),
    }
}

/// Command to process `mark` command. Days outside of the tracked period are reported but
/// nothing is changed.
pub async fn process_mark_command(
    MarkCommand {
        date,
        status,
        date_style,
    }: MarkCommand,
    tracker: &mut Tracker,
    now: DateTime<Utc>,
) -> Result<()> {
    let day = parse_day(&date, now, date_style)?;

    if tracker.set_status(day, status).await {
        println!("Marked {} as {status}", long_date(day));
        print_attendance(tracker);
    } else {
        match tracker.tracked_window() {
            Some(window) => println!(
                "{} is outside of the tracked period {} - {}, nothing was changed",
                long_date(day),
                long_date(window.start),
                long_date(window.end)
            ),
            None => println!("{} isn't tracked, nothing was changed", long_date(day)),
        }
    }
    Ok(())
}
