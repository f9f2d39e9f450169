//! Daily-note dates.
//!
//! Daily pages are titled like `January 5th, 2024`. On output they are named by
//! their ISO date (`2024-01-05`), and inline links to them are rewritten the
//! same way so the links point at the renamed file.

use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::Error;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Output layout for daily titles.
pub const DAILY_FORMAT: &str = "%Y-%m-%d";

static DAILY_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({}) ([0-9]+)[a-z]{{2}}, ([0-9]{{4}})$",
        MONTHS.join("|")
    ))
    .expect("daily title pattern")
});

static DAY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\[\[((?:{}) [0-9]+[a-z]{{2}}, [0-9]{{4}})\]\]",
        MONTHS.join("|")
    ))
    .expect("day link pattern")
});

/// Parse a daily title into its calendar date.
///
/// Returns `Ok(None)` when `text` is not shaped like a daily title at all, and
/// an error when it is shaped like one but names a day that does not exist.
pub fn parse_daily(text: &str) -> Result<Option<NaiveDate>, Error> {
    let Some(caps) = DAILY_TITLE.captures(text) else {
        return Ok(None);
    };

    let month = MONTHS
        .iter()
        .position(|m| *m == &caps[1])
        .map(|i| i as u32 + 1)
        .ok_or_else(|| Error::invalid_date(text, "unknown month"))?;
    let day: u32 = caps[2]
        .parse()
        .map_err(|_| Error::invalid_date(text, "day out of range"))?;
    let year: i32 = caps[3]
        .parse()
        .map_err(|_| Error::invalid_date(text, "year out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| Error::invalid_date(text, "no such day"))
}

/// Normalize a page title. `Some` carries the `YYYY-MM-DD` form of a daily
/// title; `None` means the title is not a daily one and stays as it is.
pub fn normalize_title(title: &str) -> Result<Option<String>, Error> {
    Ok(parse_daily(title)?.map(|date| date.format(DAILY_FORMAT).to_string()))
}

/// Rewrite every `[[January 5th, 2024]]` link in `text` to `[[2024-01-05]]`.
pub fn rewrite_day_links(text: &str) -> Result<Cow<'_, str>, Error> {
    if !DAY_LINK.is_match(text) {
        return Ok(Cow::Borrowed(text));
    }

    let mut failure = None;
    let rewritten = DAY_LINK.replace_all(text, |caps: &Captures| match parse_daily(&caps[1]) {
        Ok(Some(date)) => format!("[[{}]]", date.format(DAILY_FORMAT)),
        Ok(None) => caps[0].to_string(),
        Err(e) => {
            failure.get_or_insert(e);
            caps[0].to_string()
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(rewritten),
    }
}
