use crate::concurrency::for_each_file_limited;
use crate::config::{ArchiveFormat, CorpusOptions};
use crate::date::enumerate_filenames;
use crate::download::{join_url, DownloadOutcome, DownloadStats, Downloader};
use crate::error::Result;
use crate::paths::{available_files, plan_files};
use crate::range::normalize_date_range;
use crate::stream::{CommentQuery, CommentStream, Records, Subreddits, Texts};
use crate::util::init_tracing_once;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const NAME: &str = "reddit_comments";
pub const DESCRIPTION: &str = "An archive of ~1.5 billion publicly available Reddit comments \
                               from October 2007 through May 2015.";
pub const SITE_URL: &str = "https://archive.org/details/2015_reddit_comments_corpus";

/// Static description of the dataset plus where it lives on this machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub description: String,
    pub site_url: String,
    pub data_dir: PathBuf,
}

/// Entry point: monthly Reddit comments files under `data_dir/YYYY/RC_YYYY-MM.<ext>`.
///
/// ```no_run
/// use reddit_comments::RedditComments;
///
/// let rc = RedditComments::new().data_dir("./data/reddit_comments");
/// rc.download([Some("2007-10"), Some("2008-01")], false)?;
/// for text in rc.query().subreddit("politics").min_len(200).limit(5).texts()? {
///     println!("{}", text?);
/// }
/// # Ok::<(), reddit_comments::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct RedditComments {
    pub(crate) opts: CorpusOptions,
}

impl Default for RedditComments {
    fn default() -> Self {
        Self::new()
    }
}

impl RedditComments {
    /// Defaults, with `REDDIT_COMMENTS_DATA_DIR` / `REDDIT_COMMENTS_FORMAT` applied.
    pub fn new() -> Self {
        Self { opts: CorpusOptions::from_env() }
    }

    pub fn with_options(opts: CorpusOptions) -> Self {
        Self { opts }
    }

    // -------- Builder methods --------
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_data_dir(dir); self }
    pub fn format(mut self, format: ArchiveFormat) -> Self { self.opts = self.opts.with_format(format); self }
    pub fn download_root(mut self, root: impl Into<String>) -> Self { self.opts = self.opts.with_download_root(root); self }
    pub fn file_concurrency(mut self, n: usize) -> Self { self.opts = self.opts.with_file_concurrency(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }

    pub fn options(&self) -> &CorpusOptions {
        &self.opts
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            site_url: SITE_URL.to_string(),
            data_dir: self.opts.data_dir.clone(),
        }
    }

    /// Full paths of all monthly files under `data_dir`, sorted chronologically.
    pub fn filenames(&self) -> Vec<PathBuf> {
        available_files(&self.opts.data_dir, self.opts.format)
    }

    // -------- Download --------

    /// Fetch every monthly file in `[start, end)` that is not already on disk
    /// (all of them when `force`). Unset ends take the archive bounds.
    pub fn download<I, S>(&self, date_range: I, force: bool) -> Result<DownloadStats>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        init_tracing_once();
        let range = normalize_date_range(date_range)?;
        let fnames = enumerate_filenames(&range, self.opts.format)?;
        tracing::info!("Requested {} monthly files for {}.", fnames.len(), range);

        let downloader = Downloader::new(self.opts.progress)?;
        let stats = Mutex::new(DownloadStats::default());
        for_each_file_limited(&fnames, self.opts.file_concurrency, |fname| -> Result<()> {
            let url = join_url(&self.opts.download_root, fname);
            let dest = self.opts.data_dir.join(fname);
            let outcome = downloader.download_file(&url, &dest, force)?;
            let mut s = stats.lock();
            match outcome {
                DownloadOutcome::Skipped => s.skipped += 1,
                DownloadOutcome::Downloaded { bytes } => {
                    s.downloaded += 1;
                    s.bytes += bytes;
                }
            }
            Ok(())
        })?;
        Ok(stats.into_inner())
    }

    // -------- Streaming --------

    /// Enter query mode; chain filters, then call `texts()`, `records()` or `iterate()`.
    pub fn query(&self) -> CommentScan {
        CommentScan { corpus: self.clone(), query: CommentQuery::default() }
    }

    /// Lazily stream comments passing `query`, as cleaned texts (`text_only`) or full records.
    ///
    /// Range arguments are validated before any file is touched. When no monthly
    /// file matches, fails with `Error::NotFound` before yielding anything.
    pub fn iterate(&self, text_only: bool, query: &CommentQuery) -> Result<CommentStream> {
        init_tracing_once();
        let filter = query.resolve()?;
        let available = self.filenames();
        let files = plan_files(&available, &self.opts.data_dir, filter.date_range.as_ref(), self.opts.format)?;
        Ok(CommentStream::new(
            files,
            filter,
            text_only,
            query.limit,
            self.opts.format,
            self.opts.read_buffer_bytes,
        ))
    }

    pub fn texts(&self, query: &CommentQuery) -> Result<Texts> {
        Ok(Texts::new(self.iterate(true, query)?))
    }

    pub fn records(&self, query: &CommentQuery) -> Result<Records> {
        Ok(Records::new(self.iterate(false, query)?))
    }
}

// ----------------- Query builder -----------------

/// Filters bound to a corpus, mirroring [`CommentQuery`]'s builder.
pub struct CommentScan {
    corpus: RedditComments,
    query: CommentQuery,
}

impl CommentScan {
    pub fn subreddit(mut self, s: impl Into<Subreddits>) -> Self { self.query = self.query.subreddit(s); self }
    pub fn subreddits<I, S>(mut self, iter: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.query = self.query.subreddits(iter); self
    }
    pub fn date_range<I, S>(mut self, range: I) -> Self where I: IntoIterator<Item = Option<S>>, S: Into<String> {
        self.query = self.query.date_range(range); self
    }
    pub fn score_range<I>(mut self, range: I) -> Self where I: IntoIterator<Item = Option<i64>> {
        self.query = self.query.score_range(range); self
    }
    pub fn min_len(mut self, n: usize) -> Self { self.query = self.query.min_len(n); self }
    pub fn limit(mut self, n: usize) -> Self { self.query = self.query.limit(n); self }
    pub fn limit_signed(mut self, n: i64) -> Self { self.query = self.query.limit_signed(n); self }

    pub fn spec(&self) -> &CommentQuery {
        &self.query
    }

    pub fn iterate(self, text_only: bool) -> Result<CommentStream> {
        self.corpus.iterate(text_only, &self.query)
    }

    pub fn texts(self) -> Result<Texts> {
        self.corpus.texts(&self.query)
    }

    pub fn records(self) -> Result<Records> {
        self.corpus.records(&self.query)
    }
}
