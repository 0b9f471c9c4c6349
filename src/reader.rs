//! Line-record reader: decode a monthly file and yield one JSON object per line,
//! plus the decode-only checks used by the integrity pass.

use crate::config::ArchiveFormat;
use crate::error::{Error, Result};
use crate::util::open_with_backoff;
use bzip2::read::MultiBzDecoder;
use serde_json::{Map, Value};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

/// Open `path` and wrap it in the decoder for `format`.
///
/// zstd frames in recompressed dumps can use large windows, so we request
/// `window_log_max(31)` up front to avoid "Frame requires too much memory".
fn open_decoded(path: &Path, format: ArchiveFormat) -> Result<Box<dyn Read + Send>> {
    let file = open_with_backoff(path, 16, 50).map_err(|e| Error::io(path, e))?;
    let rdr: Box<dyn Read + Send> = match format {
        ArchiveFormat::Bz2 => Box::new(MultiBzDecoder::new(file)),
        ArchiveFormat::Zst => {
            let mut dec = ZstdDecoder::new(file).map_err(|e| Error::io(path, e))?;
            dec.window_log_max(31).map_err(|e| Error::io(path, e))?;
            Box::new(dec)
        }
        ArchiveFormat::Jsonl => Box::new(file),
    };
    Ok(rdr)
}

/// Lazy reader over the JSON objects of one monthly file, in file order.
/// Blank lines are skipped. After an I/O error the reader is exhausted.
pub struct JsonLinesReader {
    path: PathBuf,
    rdr: BufReader<Box<dyn Read + Send>>,
    buf: String,
    line_no: u64,
    done: bool,
}

impl JsonLinesReader {
    pub fn open(path: &Path, format: ArchiveFormat, buf_bytes: usize) -> Result<Self> {
        let inner = open_decoded(path, format)?;
        tracing::debug!(path = %path.display(), ?format, "opened monthly file");
        Ok(Self {
            path: path.to_path_buf(),
            rdr: BufReader::with_capacity(buf_bytes.max(8 * 1024), inner),
            buf: String::with_capacity(16 * 1024),
            line_no: 0,
            done: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for JsonLinesReader {
    type Item = Result<Map<String, Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.rdr.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim_end_matches(['\n', '\r']);
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(line).map_err(|source| Error::Json {
                        path: self.path.clone(),
                        line: self.line_no,
                        source,
                    }));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::io(&self.path, e)));
                }
            }
        }
        None
    }
}

// ----------------------------- Integrity checks ----------------------------------

/// QUICK check: decode up to `max_decompressed_bytes` and stop.
pub fn quick_validate(path: &Path, format: ArchiveFormat, max_decompressed_bytes: u64) -> Result<()> {
    let mut limited = open_decoded(path, format)?.take(max_decompressed_bytes);
    io::copy(&mut limited, &mut io::sink()).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// FULL check: decode the entire stream to EOF.
pub fn validate_full(path: &Path, format: ArchiveFormat) -> Result<()> {
    let mut dec = open_decoded(path, format)?;
    io::copy(&mut dec, &mut io::sink()).map_err(|e| Error::io(path, e))?;
    Ok(())
}
