//! JSONL output for frame logs and classification results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use handsign_common::error::{HandsignError, HandsignResult};

/// Writes one JSON value per line, after an optional `# {json}` header.
///
/// Output is buffered until [`JsonlWriter::finish`]; dropping the writer
/// without finishing still flushes, but write errors are then lost.
pub struct JsonlWriter {
    out: BufWriter<File>,
    path: PathBuf,
    lines: u64,
}

impl JsonlWriter {
    /// Create (or truncate) `path`, writing `header` as the first line.
    pub fn create<H: Serialize>(path: impl AsRef<Path>, header: Option<&H>) -> HandsignResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = Self {
            out: BufWriter::new(File::create(&path)?),
            path,
            lines: 0,
        };
        if let Some(header) = header {
            writer.out.write_all(b"# ").map_err(write_failed)?;
            writer.write_line(header)?;
        }
        Ok(writer)
    }

    /// Append `record` as one line.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> HandsignResult<()> {
        self.write_line(record)?;
        self.lines += 1;
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> HandsignResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n").map_err(write_failed)
    }

    /// Records written so far; the header is not counted.
    pub fn records_written(&self) -> u64 {
        self.lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush everything to disk and return the number of records written.
    pub fn finish(mut self) -> HandsignResult<u64> {
        self.out.flush().map_err(write_failed)?;
        Ok(self.lines)
    }
}

fn write_failed(e: std::io::Error) -> HandsignError {
    HandsignError::frame_log(format!("write failed: {e}"))
}
