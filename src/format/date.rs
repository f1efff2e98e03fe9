use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, DashboardResult};

use super::Locale;

const DATE_LOCALE: Locale = Locale::EsEs;
const INVALID_DATE: &str = "invalid date";

/// Parses a server-sent date string.
///
/// Patterns are tried in order: RFC 3339, `YYYY-MM-DD`, ISO date-times
/// without offset, RFC 2822, `DD/MM/YYYY`. The first match wins; date-times
/// keep the calendar date of their own offset.
pub fn parse_date_input(input: &str) -> DashboardResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::InvalidData("date input is empty".to_owned()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Ok(date);
    }
    Err(DashboardError::InvalidData(format!(
        "no supported date pattern matches {trimmed:?}"
    )))
}

/// Renders a date in the Spanish (Spain) long form: `15 de marzo de 2024`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        DATE_LOCALE.month_name(date.month()),
        date.year()
    )
}

/// Parses and renders a server-sent date string in one step.
///
/// Input matching no supported pattern renders as the `invalid date`
/// sentinel instead of failing.
#[must_use]
pub fn format_date(input: &str) -> String {
    match parse_date_input(input) {
        Ok(date) => long_date(date),
        Err(_) => INVALID_DATE.to_owned(),
    }
}
