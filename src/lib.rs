//! # Sym Sizes
//!
//! Samples debug symbol (`.sym`) files uploaded to a symbol server and records
//! their compressed and uncompressed sizes into a CSV file.
//!
//! ## Workflow
//!
//! 1. Query the uploads catalog page by page for files matching a module name
//! 2. Drop try uploads, non-matching keys and non-`.sym` files
//! 3. Skip files already recorded by a previous run (resume ledger)
//! 4. Download up to N new files and append one CSV row per file
//!
//! ```no_run
//! use sym_sizes::config::SymbolsConfig;
//! use sym_sizes::downloader::{SizesExecutor, SizesJob};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SymbolsConfig::default();
//! let executor = SizesExecutor::from_config(&config, "my-auth-token")?;
//! let job = SizesJob::new("libxul.so", 10, "./libxul_sizes.csv");
//! let summary = executor.execute(&job).await?;
//! println!("downloaded {}", summary.downloaded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Immutable symbol server configuration
//! - [`fetcher`] - Catalog client and sym file fetcher
//! - [`resume`] - Resume ledger built from a previous output file
//! - [`output`] - CSV output writer
//! - [`downloader`] - Workflow driver tying everything together
//! - [`cli`] - Command line interface

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt;

/// CLI command implementation
pub mod cli;

/// Symbol server configuration
pub mod config;

/// Workflow orchestration
pub mod downloader;

/// Catalog queries and file downloads
pub mod fetcher;

/// Data output writers
pub mod output;

/// Resume capability across runs
pub mod resume;

/// A file record returned by the uploads catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Slash-delimited storage key (e.g. `v1/libxul.so/ABC123/libxul.so.sym`)
    pub key: String,
    /// Stored size in bytes as reported by the catalog
    pub size: u64,
    /// Upload creation timestamp as reported by the catalog
    pub created_at: String,
}

/// Identity of a sym file across runs: (module, debug_id, debug_filename)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResumeKey {
    /// Module name
    pub module: String,
    /// Debug identifier of the build
    pub debug_id: String,
    /// Debug file name
    pub debug_filename: String,
}

impl ResumeKey {
    /// Create a resume key from its three parts
    pub fn new(
        module: impl Into<String>,
        debug_id: impl Into<String>,
        debug_filename: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            debug_id: debug_id.into(),
            debug_filename: debug_filename.into(),
        }
    }
}

impl fmt::Display for ResumeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.module, self.debug_id, self.debug_filename)
    }
}

/// A downloaded sym file with its measured sizes; one output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Module, debug id and debug filename
    pub key: ResumeKey,
    /// Absolute download URL
    pub url: String,
    /// Decompressed size in bytes
    pub size: u64,
    /// Size as transmitted (Content-Length) in bytes
    pub compressed_size: u64,
}
