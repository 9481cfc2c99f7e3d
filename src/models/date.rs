use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate};

/// Leap year used to validate bare month/day pairs, so February 29 is accepted
const REFERENCE_LEAP_YEAR: i32 = 2000;

/// Month/day label shown for a selection and stored with favorites, e.g. "March 5"
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// True when `month`/`day` names a day that exists in some year
pub fn is_valid_month_day(month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, day).is_some()
}

/// Parse user input as `YYYY-MM-DD` or `MM-DD`.
///
/// A bare month/day is placed in the current year, falling back to the
/// reference leap year for February 29 when the current year lacks it.
pub fn parse_date_input(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Date is empty");
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let (month, day) = input
        .split_once(['-', '/'])
        .context("Expected a date as MM-DD or YYYY-MM-DD")?;
    let month: u32 = month.trim().parse().with_context(|| format!("Invalid month: {}", month))?;
    let day: u32 = day.trim().parse().with_context(|| format!("Invalid day: {}", day))?;

    let year = Local::now().year();
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, day))
        .with_context(|| format!("No such day: {:02}-{:02}", month, day))
}
