//! Calendar helpers: the Monday–Friday window around a reference date and
//! inference of full dates from `(MM.DD)` header fragments.

use crate::utils::error::{MenuError, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static DATE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{2})\.(\d{2})\)").expect("date fragment pattern is valid"));

/// Monday through Friday of the week containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub monday: NaiveDate,
    pub friday: NaiveDate,
}

impl WeekWindow {
    pub fn containing(reference: NaiveDate) -> Self {
        let offset = u64::from(reference.weekday().num_days_from_monday());
        let monday = reference - Days::new(offset);
        Self {
            monday,
            friday: monday + Days::new(4),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.friday
    }

    pub fn weekdays(&self) -> impl Iterator<Item = NaiveDate> {
        let monday = self.monday;
        (0..5u64).map(move |offset| monday + Days::new(offset))
    }
}

/// Resolves a header fragment such as `"월(12.29)"` to a full date.
///
/// The year comes from `reference`, shifted back when a December date is seen
/// in January and forward when a January date is seen in December. Returns
/// `None` when there is no `(MM.DD)` substring or it names an impossible day.
pub fn infer_date(reference: NaiveDate, fragment: &str) -> Option<NaiveDate> {
    let captures = DATE_FRAGMENT.captures(fragment)?;
    let month: u32 = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;

    let year = match (month, reference.month()) {
        (12, 1) => reference.year() - 1,
        (1, 12) => reference.year() + 1,
        _ => reference.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses an optional `YYYY-MM-DD` parameter, defaulting to today.
pub fn parse_reference_date(value: Option<&str>) -> Result<NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(Local::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| MenuError::InvalidDate {
            value: raw.to_string(),
        }),
    }
}
