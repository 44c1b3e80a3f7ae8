//! CSV output writer for sym file sizes

use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

use super::{OutputError, OutputMode, OutputResult, OutputWriter, SizesWriter, HEADER};
use crate::ResolvedEntry;

/// CSV record for one measured sym file
#[derive(Debug, Serialize)]
struct SizeRecord<'a> {
    module: &'a str,
    debug_id: &'a str,
    debug_filename: &'a str,
    url: &'a str,
    size: u64,
    compressed_size: u64,
}

impl<'a> From<&'a ResolvedEntry> for SizeRecord<'a> {
    fn from(entry: &'a ResolvedEntry) -> Self {
        Self {
            module: &entry.key.module,
            debug_id: &entry.key.debug_id,
            debug_filename: &entry.key.debug_filename,
            url: &entry.url,
            size: entry.size,
            compressed_size: entry.compressed_size,
        }
    }
}

/// CSV writer for sym file sizes
///
/// Rows are written straight to the file and flushed one at a time so that an
/// interrupted run keeps everything recorded so far.
pub struct CsvSizesWriter {
    writer: Writer<File>,
    entries_written: u64,
}

impl CsvSizesWriter {
    /// Open the output file
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `mode` - `Create` truncates and writes the header, `Append` keeps
    ///   existing rows and writes no header
    pub fn open<P: AsRef<Path>>(path: P, mode: OutputMode) -> OutputResult<Self> {
        let path = path.as_ref();
        info!("Opening CSV writer: path={} mode={:?}", path.display(), mode);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::IoError(format!("Failed to create directory: {}", e)))?;
        }

        let file = match mode {
            OutputMode::Create => File::create(path),
            OutputMode::Append => OpenOptions::new().append(true).create(true).open(path),
        }
        .map_err(|e| OutputError::IoError(format!("Failed to open file: {}", e)))?;

        let mut writer = Self {
            writer: WriterBuilder::new().has_headers(false).from_writer(file),
            entries_written: 0,
        };

        if mode == OutputMode::Create {
            writer
                .writer
                .write_record(HEADER)
                .map_err(|e| OutputError::CsvError(format!("Failed to write header: {}", e)))?;
            writer.flush()?;
            debug!("CSV header written");
        }

        Ok(writer)
    }

    /// Get number of entries written so far
    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }
}

impl SizesWriter for CsvSizesWriter {
    fn write_entry(&mut self, entry: &ResolvedEntry) -> OutputResult<()> {
        self.writer
            .serialize(SizeRecord::from(entry))
            .map_err(|e| OutputError::CsvError(format!("Failed to write entry: {}", e)))?;
        self.flush()?;

        self.entries_written += 1;
        Ok(())
    }
}

impl OutputWriter for CsvSizesWriter {
    fn flush(&mut self) -> OutputResult<()> {
        self.writer
            .flush()
            .map_err(|e| OutputError::FlushError(format!("Failed to flush: {}", e)))
    }

    fn close(mut self) -> OutputResult<()> {
        debug!("Closing CSV writer: {} entries written", self.entries_written);

        self.flush()?;

        let file = self.writer.into_inner().map_err(|e| {
            OutputError::IoError(format!("Failed to get file handle: {}", e))
        })?;

        file.sync_all()
            .map_err(|e| OutputError::IoError(format!("Failed to sync file: {}", e)))?;

        info!("CSV writer closed: {} entries written", self.entries_written);
        Ok(())
    }
}
