use crate::concurrency::for_each_file_limited;
use crate::dataset::RedditComments;
use crate::error::Result;
use crate::paths::plan_files;
use crate::progress::make_count_progress;
use crate::range::DateRange;
use crate::reader::{quick_validate, validate_full};
use crate::util::init_tracing_once;
use parking_lot::Mutex;
use std::path::PathBuf;

/// Mode for integrity checks.
#[derive(Clone, Copy, Debug)]
pub enum IntegrityMode {
    /// Decode only the first `sample_bytes` (decompressed) per file.
    /// Fast and catches early corruption; cannot detect late/trailing corruption.
    Quick { sample_bytes: u64 },
    /// Decode entire stream; slowest but most thorough (validates checksums).
    Full,
}

impl RedditComments {
    /// Decode-check every monthly file in `date_range` (all files when `None`).
    /// Returns `(path, error_message)` for each file that failed; a request
    /// matching no file is `Error::NotFound`.
    ///
    /// Progress shows one tick per file. At most `file_concurrency` files are
    /// decoded at once.
    pub fn check_integrity(&self, date_range: Option<&DateRange>, mode: IntegrityMode) -> Result<Vec<(PathBuf, String)>> {
        init_tracing_once();
        let available = self.filenames();
        let files = plan_files(&available, &self.opts.data_dir, date_range, self.opts.format)?;

        let label = match mode {
            IntegrityMode::Quick { .. } => "Integrity (quick)",
            IntegrityMode::Full => "Integrity (full)",
        };
        let pb = self.opts.progress.then(|| make_count_progress(files.len() as u64, label));
        let format = self.opts.format;
        let errors = Mutex::new(Vec::<(PathBuf, String)>::new());

        for_each_file_limited(&files, self.opts.file_concurrency, |path| -> Result<()> {
            let res = match mode {
                IntegrityMode::Quick { sample_bytes } => quick_validate(path, format, sample_bytes),
                IntegrityMode::Full => validate_full(path, format),
            };
            if let Err(e) = res {
                tracing::warn!(path = %path.display(), error = %e, "integrity check failed");
                errors.lock().push((path.clone(), e.to_string()));
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            Ok(())
        })?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }
        let mut bad = errors.into_inner();
        bad.sort();
        Ok(bad)
    }
}
