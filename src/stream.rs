//! Filtered streaming over monthly files: query spec, per-line filter chain,
//! and the lazy iterators handed back to callers.

use crate::clean::clean_content;
use crate::config::ArchiveFormat;
use crate::error::Result;
use crate::range::{normalize_date_range, normalize_score_range, DateRange, ScoreRange};
use crate::reader::JsonLinesReader;
use crate::record::Record;
use ahash::AHashSet;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

// ----------------------------- Query spec ------------------------------------

/// Subreddit filter: one name or many, always held as a set.
/// Membership is exact against the record's raw `subreddit` value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subreddits(AHashSet<String>);

impl Subreddits {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Subreddits {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Subreddits {
    fn from(s: &str) -> Self {
        std::iter::once(s).collect()
    }
}

impl From<String> for Subreddits {
    fn from(s: String) -> Self {
        std::iter::once(s).collect()
    }
}

impl From<&[&str]> for Subreddits {
    fn from(v: &[&str]) -> Self {
        v.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Subreddits {
    fn from(v: [&str; N]) -> Self {
        v.into_iter().collect()
    }
}

impl From<Vec<String>> for Subreddits {
    fn from(v: Vec<String>) -> Self {
        v.into_iter().collect()
    }
}

impl From<Vec<&str>> for Subreddits {
    fn from(v: Vec<&str>) -> Self {
        v.into_iter().collect()
    }
}

impl From<HashSet<String>> for Subreddits {
    fn from(v: HashSet<String>) -> Self {
        v.into_iter().collect()
    }
}

impl From<BTreeSet<String>> for Subreddits {
    fn from(v: BTreeSet<String>) -> Self {
        v.into_iter().collect()
    }
}

/// Declarative filters for one iteration. Ranges are kept as given and
/// normalized by [`CommentQuery::resolve`], before any file is touched.
#[derive(Clone, Debug, Default)]
pub struct CommentQuery {
    pub subreddits: Option<Subreddits>,
    pub date_range: Option<Vec<Option<String>>>, // [start, end)
    pub score_range: Option<Vec<Option<i64>>>,   // [min, max)
    pub min_len: usize,                          // chars of cleaned body; 0 = off
    pub limit: Option<usize>,                    // None = unbounded
}

impl CommentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subreddit(mut self, s: impl Into<Subreddits>) -> Self {
        self.subreddits = Some(s.into());
        self
    }
    pub fn subreddits<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subreddits = Some(iter.into_iter().collect());
        self
    }
    /// `[start, end]`; `None` or `""` on either side takes the archive bound.
    pub fn date_range<I, S>(mut self, range: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.date_range = Some(range.into_iter().map(|s| s.map(Into::into)).collect());
        self
    }
    /// `[min, max]`; `None` or `0` on either side takes the 32-bit bound.
    pub fn score_range<I>(mut self, range: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        self.score_range = Some(range.into_iter().collect());
        self
    }
    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = n;
        self
    }
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
    /// `-1` (any negative) for unbounded, otherwise a cap on yielded items.
    pub fn limit_signed(mut self, n: i64) -> Self {
        self.limit = usize::try_from(n).ok();
        self
    }

    /// Normalize ranges and drop empty filters. Fails with `InvalidArgument`
    /// when a range is not exactly two items.
    pub fn resolve(&self) -> Result<RecordFilter> {
        let date_range = match &self.date_range {
            Some(r) => Some(normalize_date_range(r.iter().map(|s| s.as_deref()))?),
            None => None,
        };
        let score_range = match &self.score_range {
            Some(r) => Some(normalize_score_range(r.iter().copied())?),
            None => None,
        };
        Ok(RecordFilter {
            subreddits: self.subreddits.clone().filter(|s| !s.is_empty()),
            date_range,
            score_range,
            min_len: self.min_len,
        })
    }
}

// ----------------------------- Filter chain ------------------------------------

/// Resolved filters, applied to each line in a fixed order.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    pub subreddits: Option<Subreddits>,
    pub date_range: Option<DateRange>,
    pub score_range: Option<ScoreRange>,
    pub min_len: usize,
}

/// `score` as an integer; numeric strings are tolerated.
fn score_of(fields: &Map<String, Value>) -> Option<i64> {
    match fields.get("score")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl RecordFilter {
    /// Subreddit → score → created_utc (converted) vs date range → clean body → min length.
    /// Short-circuits on the first failing test; returns the prepared record on success.
    pub fn admit(&self, fields: Map<String, Value>) -> Option<Record> {
        if let Some(subs) = &self.subreddits {
            match fields.get("subreddit").and_then(Value::as_str) {
                Some(s) if subs.contains(s) => {}
                _ => return None,
            }
        }
        if let Some(range) = &self.score_range {
            match score_of(&fields) {
                Some(sc) if range.contains(sc) => {}
                _ => return None,
            }
        }

        let mut rec = Record::from_fields(fields);
        rec.convert_timestamp_field("created_utc");
        if let Some(range) = &self.date_range {
            if !range.contains(rec.created_utc()) {
                return None;
            }
        }

        let body = clean_content(rec.body());
        if self.min_len > 0 && body.chars().count() < self.min_len {
            return None;
        }
        rec.set_body(body);
        Some(rec)
    }
}

// ----------------------------- Streaming ------------------------------------

/// One yielded item: the cleaned body, or the whole record.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamItem {
    Text(String),
    Record(Record),
}

impl StreamItem {
    pub fn into_text(self) -> String {
        match self {
            StreamItem::Text(t) => t,
            StreamItem::Record(r) => r.into_body(),
        }
    }
}

/// Lazy, single-pass iteration over the records of `files`, in order.
///
/// Files are opened only when reached. Once `limit` items have been yielded the
/// current reader is dropped and no further line or file is read. The first
/// error is yielded and ends the stream.
pub struct CommentStream {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<JsonLinesReader>,
    filter: RecordFilter,
    text_only: bool,
    limit: Option<usize>,
    yielded: usize,
    format: ArchiveFormat,
    read_buf_bytes: usize,
    finished: bool,
}

impl CommentStream {
    pub fn new(
        files: Vec<PathBuf>,
        filter: RecordFilter,
        text_only: bool,
        limit: Option<usize>,
        format: ArchiveFormat,
        read_buf_bytes: usize,
    ) -> Self {
        Self {
            files: files.into_iter(),
            current: None,
            filter,
            text_only,
            limit,
            yielded: 0,
            format,
            read_buf_bytes,
            finished: false,
        }
    }

    /// Items yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn stop(&mut self) {
        self.finished = true;
        self.current = None;
        self.files = Vec::new().into_iter();
    }

    /// Next record passing every filter, counted against the limit.
    fn next_passing(&mut self) -> Option<Result<Record>> {
        if self.finished || self.limit.is_some_and(|l| self.yielded >= l) {
            self.stop();
            return None;
        }
        loop {
            let item = match self.current.as_mut() {
                Some(reader) => reader.next(),
                None => {
                    let path = self.files.next()?;
                    match JsonLinesReader::open(&path, self.format, self.read_buf_bytes) {
                        Ok(r) => self.current = Some(r),
                        Err(e) => {
                            self.stop();
                            return Some(Err(e));
                        }
                    }
                    continue;
                }
            };
            match item {
                None => self.current = None,
                Some(Err(e)) => {
                    self.stop();
                    return Some(Err(e));
                }
                Some(Ok(fields)) => {
                    if let Some(rec) = self.filter.admit(fields) {
                        self.yielded += 1;
                        if self.limit == Some(self.yielded) {
                            // reached the cap: release the open file now
                            self.stop();
                        }
                        return Some(Ok(rec));
                    }
                }
            }
        }
    }

    fn finish_item(&self, rec: Record) -> StreamItem {
        if self.text_only {
            StreamItem::Text(rec.into_body())
        } else {
            StreamItem::Record(full_record(rec))
        }
    }
}

impl Iterator for CommentStream {
    type Item = Result<StreamItem>;

    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.next_passing()?;
        Some(rec.map(|r| self.finish_item(r)))
    }
}

/// A passing record as yielded in full: `retrieved_on` is only converted here.
fn full_record(mut rec: Record) -> Record {
    rec.convert_timestamp_field("retrieved_on");
    rec
}

/// Cleaned comment bodies.
pub struct Texts(CommentStream);

impl Texts {
    pub(crate) fn new(stream: CommentStream) -> Self {
        Self(stream)
    }
}

impl Iterator for Texts {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next_passing()?.map(Record::into_body))
    }
}

/// Full records with `retrieved_on` converted.
pub struct Records(CommentStream);

impl Records {
    pub(crate) fn new(stream: CommentStream) -> Self {
        Self(stream)
    }
}

impl Iterator for Records {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next_passing()?.map(full_record))
    }
}
