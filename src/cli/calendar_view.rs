use std::fmt::Write;

use ansi_term::{Colour, Style};
use chrono::{Datelike, NaiveDate, Weekday};

use crate::{
    calendar::month::MonthGrid,
    tracker::{status::Status, Tracker},
    utils::time::long_date,
};

const WEEKDAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// How statuses look in the terminal. The domain knows nothing about colours, this is the only
/// place mapping them.
fn status_colour(status: Status) -> Option<Colour> {
    match status {
        Status::Office => Some(Colour::Green),
        Status::WorkFromHome => Some(Colour::Blue),
        Status::Leave => Some(Colour::Purple),
        Status::Holiday => Some(Colour::Fixed(208)),
        Status::Unset => None,
    }
}

/// Single letter used when colours are disabled.
fn status_mark(status: Status) -> char {
    match status {
        Status::Office => 'O',
        Status::WorkFromHome => 'W',
        Status::Leave => 'L',
        Status::Holiday => 'H',
        Status::Unset => ' ',
    }
}

fn render_day(day: NaiveDate, status: Option<Status>, today: NaiveDate, styled: bool) -> String {
    let status = status.unwrap_or_default();
    let text = format!("{:>3}{}", day.day(), status_mark(status));
    if !styled {
        return text;
    }

    let mut style = match status_colour(status) {
        Some(colour) => Style::new().fg(Colour::Black).on(colour),
        None if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) => Style::new().dimmed(),
        None => Style::new(),
    };
    if day == today {
        style = style.bold().underline();
    }
    style.paint(text).to_string()
}

/// Draws a month as a Sunday-first grid. Every cell is 4 characters wide plus a separator.
pub fn render_month(
    grid: &MonthGrid,
    status_of: impl Fn(NaiveDate) -> Option<Status>,
    today: NaiveDate,
    styled: bool,
) -> String {
    let mut out = String::new();
    let width = WEEKDAY_NAMES.len() * 5 - 1;
    let _ = writeln!(out, "{:^width$}", grid.title);
    let header = WEEKDAY_NAMES
        .iter()
        .map(|name| format!("{name:>3} "))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{}", header.trim_end());

    for week in grid.weeks() {
        let line = week
            .into_iter()
            .map(|cell| match cell {
                Some(day) => render_day(day, status_of(day), today, styled),
                None => "    ".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn legend(styled: bool) -> String {
    Status::ALL
        .into_iter()
        .filter(|status| *status != Status::Unset)
        .map(|status| {
            let label = format!("{} {}", status_mark(status), status.label());
            match status_colour(status).filter(|_| styled) {
                Some(colour) => Style::new().fg(Colour::Black).on(colour).paint(label).to_string(),
                None => label,
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Prints the month currently selected in the tracker followed by the attendance numbers.
pub fn print_month(tracker: &Tracker, styled: bool) {
    print!(
        "{}",
        render_month(
            &tracker.month_grid(),
            |day| tracker.status_on(day),
            tracker.today(),
            styled
        )
    );
    println!();
    println!("{}", legend(styled));
    println!();
    print_attendance(tracker);
}

pub fn print_attendance(tracker: &Tracker) {
    let period = tracker.display_window();
    println!(
        "Attendance {} for {} - {}",
        tracker.attendance_percentage(),
        long_date(period.start),
        long_date(period.end)
    );
    println!(
        "Days needed to reach {}: {}",
        tracker.policy().threshold,
        tracker.required_days()
    );
}

/// Prints numbers behind the attendance percentage.
pub fn print_summary(tracker: &Tracker) {
    let summary = tracker.summary();
    let window = tracker.reporting_window();
    println!(
        "Period\t{} - {}",
        long_date(window.start),
        long_date(window.end)
    );
    println!("Attendance\t{}", summary.percentage);
    println!("Eligible days\t{}", summary.eligible_days);
    println!("Attended days\t{}", summary.attended_days);
    println!("Days needed\t{}", summary.required_days);
    println!();
    for (status, count) in summary.breakdown.iter() {
        println!("{}\t{count}", status.label());
    }
}
