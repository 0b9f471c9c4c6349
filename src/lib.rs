//! Streaming access to the 2007–2015 Reddit comments archive.
//!
//! Monthly files live at `<data_dir>/YYYY/RC_YYYY-MM.bz2`. [`RedditComments`]
//! downloads them and streams comments lazily, filtered by subreddit, date range,
//! score range and minimum cleaned-body length, with a global result limit.

mod config;
mod error;
mod date;
mod range;
mod clean;
mod record;

mod util;
mod paths;
mod reader;
mod concurrency;
mod progress;
mod download;

mod stream;
mod dataset;
mod integrity;

pub use crate::config::{ArchiveFormat, CorpusOptions, DEFAULT_DATA_DIR, DEFAULT_DOWNLOAD_ROOT};
pub use crate::error::{Error, Result};
pub use crate::date::{convert_timestamp, enumerate_filenames, monthly_filename, months_in_range, YearMonth};
pub use crate::range::{
    normalize_date_range, normalize_score_range, DateRange, ScoreRange, MAX_DATE, MAX_SCORE, MIN_DATE, MIN_SCORE,
};
pub use crate::clean::{clean_content, normalize_whitespace};
pub use crate::record::Record;

pub use crate::dataset::{CommentScan, DatasetInfo, RedditComments};
pub use crate::stream::{CommentQuery, CommentStream, RecordFilter, Records, StreamItem, Subreddits, Texts};
pub use crate::integrity::IntegrityMode;

// Lower-level collaborators, usable on their own.
pub use crate::paths::{available_files, discover_files, plan_files};
pub use crate::reader::{quick_validate, validate_full, JsonLinesReader};
pub use crate::download::{join_url, DownloadOutcome, DownloadStats, Downloader};

// Expose multiprogress and logging setup to binaries.
pub use crate::progress::set_global_multiprogress;
pub use crate::util::init_tracing_once;
