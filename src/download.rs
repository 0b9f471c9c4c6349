//! Bulk downloader: stream a remote monthly file to disk.
//!
//! Data goes to `<dest>.part` first and is promoted with an atomic replace, so an
//! interrupted transfer never leaves a truncated archive under the final name.
//! There is no retry or resume; a failed transfer removes its partial file.

use crate::error::{Error, Result};
use crate::progress::make_progress_bar_labeled;
use crate::util::{create_with_backoff, remove_with_backoff, replace_file_atomic_backoff};
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CHUNK_BYTES: usize = 64 * 1024;

/// What happened to one requested file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Destination already existed and `force` was off.
    Skipped,
    Downloaded { bytes: u64 },
}

/// Totals for a batch of monthly downloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub bytes: u64,
}

/// `root` joined with a relative `fname`, with exactly one `/` between them.
pub fn join_url(root: &str, fname: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), fname.trim_start_matches('/'))
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

pub struct Downloader {
    client: Client,
    progress: bool,
}

impl Downloader {
    /// HTTP client with a 30s connect timeout and no overall deadline;
    /// monthly archives run to several GB.
    pub fn new(progress: bool) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| Error::Http { url: String::new(), source })?;
        Ok(Self { client, progress })
    }

    /// Fetch `url` into `dest`, creating parent directories as needed.
    /// Skips the transfer when `dest` exists, unless `force`.
    pub fn download_file(&self, url: &str, dest: &Path, force: bool) -> Result<DownloadOutcome> {
        if dest.is_file() && !force {
            tracing::warn!(path = %dest.display(), "file already exists; skipping download");
            return Ok(DownloadOutcome::Skipped);
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        tracing::info!(url, path = %dest.display(), "downloading");

        let http_err = |source: reqwest::Error| Error::Http { url: url.to_string(), source };
        let resp = self.client.get(url).send().map_err(http_err)?;
        let mut resp = resp.error_for_status().map_err(http_err)?;

        let pb = self.progress.then(|| {
            let label = dest.file_name().map(|n| n.to_string_lossy().into_owned());
            make_progress_bar_labeled(resp.content_length().unwrap_or(0), label.as_deref())
        });

        let tmp = part_path(dest);
        match stream_to(&mut resp, &tmp, pb.as_ref()) {
            Ok(bytes) => {
                replace_file_atomic_backoff(&tmp, dest).map_err(|e| Error::io(dest, e))?;
                if let Some(pb) = pb {
                    pb.finish_with_message("done");
                }
                tracing::info!(path = %dest.display(), bytes, "download complete");
                Ok(DownloadOutcome::Downloaded { bytes })
            }
            Err(e) => {
                if let Err(rm) = remove_with_backoff(&tmp, 4, 50) {
                    tracing::warn!(path = %tmp.display(), error = %rm, "could not remove partial download");
                }
                if let Some(pb) = pb {
                    pb.abandon_with_message("failed");
                }
                Err(e)
            }
        }
    }
}

fn stream_to(src: &mut impl Read, tmp: &Path, pb: Option<&ProgressBar>) -> Result<u64> {
    let file = create_with_backoff(tmp, 16, 50).map_err(|e| Error::io(tmp, e))?;
    let mut out = BufWriter::with_capacity(CHUNK_BYTES * 4, file);
    let mut buf = vec![0u8; CHUNK_BYTES];
    let mut total = 0u64;
    loop {
        let n = src.read(&mut buf).map_err(|e| Error::io(tmp, e))?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n]).map_err(|e| Error::io(tmp, e))?;
        total += n as u64;
        if let Some(pb) = pb {
            pb.inc(n as u64);
        }
    }
    out.flush().map_err(|e| Error::io(tmp, e))?;
    Ok(total)
}
