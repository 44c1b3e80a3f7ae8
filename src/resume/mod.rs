//! Resume capability across runs
//!
//! A rerun against the same output file skips every file a previous run
//! already recorded, so repeated runs never duplicate a row.

pub mod ledger;

pub use ledger::ResumeLedger;

/// Resume errors
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// Previous output could not be read
    #[error("IO error: {0}")]
    IoError(String),
}

/// Result type for resume operations
pub type ResumeResult<T> = Result<T, ResumeError>;
