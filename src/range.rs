//! Date and score intervals with dataset-wide defaults for open endpoints.

use crate::error::{Error, Result};
use std::fmt;

/// Earliest month covered by the archive.
pub const MIN_DATE: &str = "2007-10-01";
/// Exclusive end of the archive (last month is 2015-05).
pub const MAX_DATE: &str = "2015-06-01";
pub const MIN_SCORE: i64 = -2_147_483_647;
pub const MAX_SCORE: i64 = 2_147_483_647;

/// Half-open `[start, end)` over ISO date-ish strings.
///
/// Bounds are compared as strings against `YYYY-MM-DDTHH:MM:SS` timestamps, so any
/// prefix of that form (`2015-01`, `2015-01-01`, `2015-01-01T12`) works as a bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: String,
    end: String,
}

impl DateRange {
    /// Both ends given or defaulted; equivalent to `normalize_date_range([start, end])`.
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: non_empty(start).unwrap_or(MIN_DATE).to_string(),
            end: non_empty(end).unwrap_or(MAX_DATE).to_string(),
        }
    }

    /// The whole archive.
    pub fn full() -> Self {
        Self::new(None, None)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// `start <= ts < end` by string order. An empty timestamp never matches.
    #[inline]
    pub fn contains(&self, ts: &str) -> bool {
        self.start.as_str() <= ts && ts < self.end.as_str()
    }

    pub fn into_pair(self) -> (String, String) {
        (self.start, self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Half-open `[min, max)` over net comment score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    /// `None` or `0` on either side takes the 32-bit bound.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min: min.filter(|v| *v != 0).unwrap_or(MIN_SCORE),
            max: max.filter(|v| *v != 0).unwrap_or(MAX_SCORE),
        }
    }

    #[inline]
    pub fn contains(&self, score: i64) -> bool {
        self.min <= score && score < self.max
    }
}

/// Trimmed bound, or `None` when unset or blank.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

/// Exactly two elements, `[start, end]`; unset or blank sides take the archive bounds.
/// Given bounds are trimmed.
/// No date-format validation happens here.
pub fn normalize_date_range<I, S>(range: I) -> Result<DateRange>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let parts: Vec<Option<S>> = range.into_iter().collect();
    match parts.as_slice() {
        [start, end] => Ok(DateRange::new(
            start.as_ref().map(|s| s.as_ref()),
            end.as_ref().map(|s| s.as_ref()),
        )),
        other => Err(Error::InvalidArgument(format!(
            "date_range must have exactly two items, start and end (got {})",
            other.len()
        ))),
    }
}

/// Exactly two elements, `[min, max]`; unset or zero sides take the 32-bit signed bounds.
pub fn normalize_score_range<I>(range: I) -> Result<ScoreRange>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let parts: Vec<Option<i64>> = range.into_iter().collect();
    match parts.as_slice() {
        [min, max] => Ok(ScoreRange::new(*min, *max)),
        other => Err(Error::InvalidArgument(format!(
            "score_range must have exactly two items, min and max (got {})",
            other.len()
        ))),
    }
}
