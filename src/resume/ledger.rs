//! Resume ledger built from a previous output file
//!
//! The scan is textual: each line is split on `,` and its first three fields
//! are taken verbatim as the resume key. Fields are not unquoted or trimmed.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{ResumeError, ResumeResult};
use crate::output::{OutputMode, HEADER};
use crate::ResumeKey;

/// Keys already recorded by earlier runs
#[derive(Debug, Clone, Default)]
pub struct ResumeLedger {
    keys: HashSet<ResumeKey>,
    mode: OutputMode,
}

impl ResumeLedger {
    /// Load the ledger for `path`
    ///
    /// A missing file yields an empty ledger in [`OutputMode::Create`]; an
    /// existing file is scanned and the ledger is in [`OutputMode::Append`].
    pub fn load<P: AsRef<Path>>(path: P) -> ResumeResult<Self> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No previous output at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ResumeError::IoError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let ledger = Self::parse(&contents);
        info!(
            "Loaded {} recorded entries from {}",
            ledger.len(),
            path.display()
        );
        Ok(ledger)
    }

    /// Build an append-mode ledger from the text of an output file
    pub fn parse(contents: &str) -> Self {
        let mut keys = HashSet::new();

        for (index, line) in contents.lines().enumerate() {
            match parse_line(line) {
                LineKind::Header => continue,
                LineKind::Key(key) => {
                    keys.insert(key);
                }
                LineKind::Short => {
                    if !line.is_empty() {
                        warn!("Ignoring line {} with fewer than 3 fields: {:?}", index + 1, line);
                    }
                }
            }
        }

        Self {
            keys,
            mode: OutputMode::Append,
        }
    }

    /// Whether `key` was recorded by an earlier run
    pub fn contains(&self, key: &ResumeKey) -> bool {
        self.keys.contains(key)
    }

    /// Record a key written during the current run
    ///
    /// Returns `false` if the key was already present.
    pub fn record(&mut self, key: ResumeKey) -> bool {
        self.keys.insert(key)
    }

    /// Number of recorded keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are recorded
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// How the output file must be opened
    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }
}

enum LineKind {
    Header,
    Key(ResumeKey),
    Short,
}

fn parse_line(line: &str) -> LineKind {
    let mut fields = line.split(',');

    let first = fields.next().unwrap_or_default();
    if first == HEADER[0] {
        return LineKind::Header;
    }

    match (fields.next(), fields.next()) {
        (Some(second), Some(third)) => LineKind::Key(ResumeKey::new(first, second, third)),
        _ => LineKind::Short,
    }
}
