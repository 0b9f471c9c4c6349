use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "./data/reddit_comments";
pub const DEFAULT_DOWNLOAD_ROOT: &str =
    "https://archive.org/download/2015_reddit_comments_corpus/reddit_data/";

/// Env override for `data_dir`.
pub const ENV_DATA_DIR: &str = "REDDIT_COMMENTS_DATA_DIR";
/// Env override for `format` (`bz2`, `zst`, `jsonl`).
pub const ENV_FORMAT: &str = "REDDIT_COMMENTS_FORMAT";

/// On-disk encoding of the monthly files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// `RC_YYYY-MM.bz2`, as published on archive.org.
    #[default]
    Bz2,
    /// `RC_YYYY-MM.zst`, for locally recompressed corpora.
    Zst,
    /// `RC_YYYY-MM.jsonl`, uncompressed.
    Jsonl,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Bz2 => "bz2",
            ArchiveFormat::Zst => "zst",
            ArchiveFormat::Jsonl => "jsonl",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "bz2" | "bzip2" => Ok(ArchiveFormat::Bz2),
            "zst" | "zstd" => Ok(ArchiveFormat::Zst),
            "jsonl" | "ndjson" | "json" => Ok(ArchiveFormat::Jsonl),
            other => Err(format!("unknown archive format {other:?} (expected bz2, zst or jsonl)")),
        }
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CorpusOptions {
    pub data_dir: PathBuf,            // files live at data_dir/YYYY/RC_YYYY-MM.<ext>
    pub format: ArchiveFormat,
    pub download_root: String,        // base URL; monthly filenames are joined onto it
    pub file_concurrency: usize,      // parallel downloads / integrity checks
    pub progress: bool,               // show progress bars
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            format: ArchiveFormat::default(),
            download_root: DEFAULT_DOWNLOAD_ROOT.to_string(),
            file_concurrency: 1,
            progress: true,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
        }
    }
}

impl CorpusOptions {
    /// Defaults, then `REDDIT_COMMENTS_DATA_DIR` / `REDDIT_COMMENTS_FORMAT` if set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(dir) = env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                opts.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(fmt) = env::var(ENV_FORMAT) {
            match fmt.parse() {
                Ok(f) => opts.format = f,
                Err(e) => tracing::warn!("{} ignored: {}", ENV_FORMAT, e),
            }
        }
        opts
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_format(mut self, format: ArchiveFormat) -> Self {
        self.format = format;
        self
    }
    pub fn with_download_root(mut self, root: impl Into<String>) -> Self {
        self.download_root = root.into();
        self
    }
    pub fn with_file_concurrency(mut self, n: usize) -> Self {
        self.file_concurrency = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
}
