use crate::config::ArchiveFormat;
use crate::date::enumerate_filenames;
use crate::error::{Error, Result};
use crate::range::DateRange;
use ahash::AHashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All files under `root` whose extension is `extension`, descending into
/// subdirectories when `recursive`. No ordering guarantee.
pub fn discover_files(root: &Path, extension: &str, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(ent) => Some(ent),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|ent| ent.file_type().is_file())
        .filter(|ent| ent.path().extension().and_then(|x| x.to_str()) == Some(extension))
        .map(|ent| ent.into_path())
        .collect()
}

/// Monthly files on disk for `format`, sorted (zero-padded names sort chronologically).
/// A missing data dir is logged and yields an empty list.
pub fn available_files(data_dir: &Path, format: ArchiveFormat) -> Vec<PathBuf> {
    if !data_dir.exists() {
        tracing::warn!(data_dir = %data_dir.display(), "data directory does not exist");
        return Vec::new();
    }
    let mut files = discover_files(data_dir, format.extension(), true);
    files.sort();
    files
}

/// Restrict `available` to the months covered by `date_range`; all of them when `None`.
/// Resolved months with no file on disk are skipped silently. An empty result is
/// `Error::NotFound`.
pub fn plan_files(
    available: &[PathBuf],
    data_dir: &Path,
    date_range: Option<&DateRange>,
    format: ArchiveFormat,
) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = match date_range {
        Some(range) => {
            let needed: AHashSet<PathBuf> = enumerate_filenames(range, format)?
                .into_iter()
                .map(|fname| data_dir.join(fname))
                .collect();
            available.iter().filter(|p| needed.contains(*p)).cloned().collect()
        }
        None => available.to_vec(),
    };

    if files.is_empty() {
        return Err(Error::NotFound {
            data_dir: data_dir.to_path_buf(),
            date_range: date_range.map(|r| r.clone().into_pair()),
        });
    }
    tracing::info!("Planned {} monthly files for processing.", files.len());
    Ok(files)
}
