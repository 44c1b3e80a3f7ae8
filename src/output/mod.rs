//! Data output writers

use crate::ResolvedEntry;

pub mod csv;

pub use self::csv::CsvSizesWriter;

/// Column names of the output file, in order
pub const HEADER: [&str; 6] = [
    "module",
    "debug_id",
    "debug_filename",
    "url",
    "size",
    "compressed_size",
];

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Buffer flush error
    #[error("flush error: {0}")]
    FlushError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// How an output file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// File did not exist: create it and write the header row
    #[default]
    Create,
    /// File exists: append rows after its current contents
    Append,
}

/// Generic output writer trait
pub trait OutputWriter {
    /// Flush any buffered data to disk
    fn flush(&mut self) -> OutputResult<()>;

    /// Close the writer and finalize output
    fn close(self) -> OutputResult<()>;
}

/// Trait for writing measured sym files
pub trait SizesWriter: OutputWriter {
    /// Write a single entry; it must be on disk once this returns
    fn write_entry(&mut self, entry: &ResolvedEntry) -> OutputResult<()>;
}
