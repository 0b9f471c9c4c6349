//! Month arithmetic, canonical monthly filenames and timestamp conversion.

use crate::config::ArchiveFormat;
use crate::error::{Error, Result};
use crate::range::DateRange;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

/// Simple "YYYY-MM" utility with safe arithmetic and ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8, // 1..=12
}

impl YearMonth {
    pub fn next(self) -> Option<Self> {
        if self.month < 12 {
            Some(Self { year: self.year, month: self.month + 1 })
        } else if self.year < 9999 {
            Some(Self { year: self.year + 1, month: 1 })
        } else {
            None
        }
    }

    /// Canonical archive path for this month, relative to the data dir.
    pub fn filename(self, format: ArchiveFormat) -> String {
        format!("{:04}/RC_{}.{}", self.year, self, format.extension())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Accepts `YYYY-MM` or `YYYY-MM-DD`; the latter resolves to its containing month.
    fn from_str(s: &str) -> Result<Self> {
        parse_month(s)
    }
}

/// Parse `YYYY-MM` or `YYYY-MM-DD` (validated as a calendar date) into its month.
fn parse_month(s: &str) -> Result<YearMonth> {
    let invalid = || Error::InvalidArgument(format!("{s:?} is not a YYYY-MM or YYYY-MM-DD date"));
    let parts: Vec<&str> = s.trim().split('-').collect();
    let (y, m, d) = match parts.as_slice() {
        [y, m] => (*y, *m, None),
        [y, m, d] => (*y, *m, Some(*d)),
        _ => return Err(invalid()),
    };
    if y.len() != 4 || !(1..=2).contains(&m.len()) {
        return Err(invalid());
    }
    let year: u16 = y.parse().map_err(|_| invalid())?;
    let month: u8 = m.parse().map_err(|_| invalid())?;
    let cal_month = Month::try_from(month).map_err(|_| invalid())?;
    let day: u8 = match d {
        None => 1,
        Some(d) if (1..=2).contains(&d.len()) => d.parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };
    Date::from_calendar_date(i32::from(year), cal_month, day).map_err(|_| invalid())?;
    Ok(YearMonth { year, month })
}

/// `YYYY/RC_YYYY-MM.<ext>` for any `YYYY-MM` or `YYYY-MM-DD` value.
pub fn monthly_filename(date: &str, format: ArchiveFormat) -> Result<String> {
    Ok(date.parse::<YearMonth>()?.filename(format))
}

/// Months `m` with `start_month <= m < end_month`, in order.
///
/// Both ends are compared at month granularity: a `YYYY-MM-DD` end excludes its
/// whole month, same as `YYYY-MM`.
pub fn months_in_range(range: &DateRange) -> Result<Vec<YearMonth>> {
    let start: YearMonth = range.start().parse()?;
    let end: YearMonth = range.end().parse()?;

    let mut months = Vec::new();
    let mut curr = Some(start);
    while let Some(ym) = curr {
        if ym >= end {
            break;
        }
        months.push(ym);
        curr = ym.next();
    }
    Ok(months)
}

/// Ordered monthly filenames covering the half-open `range`.
pub fn enumerate_filenames(range: &DateRange, format: ArchiveFormat) -> Result<Vec<String>> {
    Ok(months_in_range(range)?.into_iter().map(|ym| ym.filename(format)).collect())
}

// ----------------------------- Timestamps ------------------------------------

/// Interpret a JSON value as an integer Unix timestamp.
/// Numbers and numeric strings are accepted; fractional seconds are truncated.
fn epoch_seconds(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Unix timestamp → `YYYY-MM-DDTHH:MM:SS` (UTC). Anything unparsable becomes `""`.
pub fn convert_timestamp(v: Option<&Value>) -> String {
    let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    v.and_then(epoch_seconds)
        .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
        .filter(|dt| dt.year() >= 1)
        .and_then(|dt| dt.format(&fmt).ok())
        .unwrap_or_default()
}
