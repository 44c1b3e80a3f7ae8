//! Sym sizes executor

use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::key::{is_recordable, is_sym_key, normalize_key, resume_key_from};
use super::{DownloadResult, RunSummary, SizesJob};
use crate::config::SymbolsConfig;
use crate::fetcher::{
    SymFileDownloader, SymFileFetcher, SymbolCatalog, SymbolsHttpClient, UploadsCatalog,
};
use crate::output::{CsvSizesWriter, OutputWriter, SizesWriter};
use crate::resume::ResumeLedger;
use crate::ResolvedEntry;

/// Runs a [`SizesJob`] against a catalog and a fetcher
pub struct SizesExecutor<C, F> {
    catalog: C,
    fetcher: F,
    config: SymbolsConfig,
}

impl SizesExecutor<UploadsCatalog, SymFileDownloader> {
    /// Build an executor talking to the configured symbol server
    pub fn from_config(config: &SymbolsConfig, auth_token: &str) -> DownloadResult<Self> {
        let client = Arc::new(config.build_http_client()?);
        let http_client = SymbolsHttpClient::new(client, auth_token);

        let catalog = UploadsCatalog::new(http_client.clone(), config)?;
        let fetcher = SymFileDownloader::new(http_client);

        Ok(Self::new(catalog, fetcher, config))
    }
}

impl<C, F> SizesExecutor<C, F>
where
    C: SymbolCatalog,
    F: SymFileFetcher,
{
    /// Create an executor from its collaborators
    pub fn new(catalog: C, fetcher: F, config: &SymbolsConfig) -> Self {
        Self {
            catalog,
            fetcher,
            config: config.clone(),
        }
    }

    /// Run the job to completion
    ///
    /// The limit check happens before each record, against the number of
    /// entries processed so far, so the loop keeps going while
    /// `processed <= limit` and may process `limit + 1` entries.
    pub async fn execute(&self, job: &SizesJob) -> DownloadResult<RunSummary> {
        let mut ledger = ResumeLedger::load(&job.output)?;
        let mut writer = CsvSizesWriter::open(&job.output, ledger.output_mode())?;
        let mut summary = RunSummary::default();
        let limit = job.limit;

        let mut records = self.catalog.search(&job.module);

        while let Some(record) = records.next().await {
            let record = record?;

            if summary.processed > limit {
                debug!("Limit reached after {} entries", summary.processed);
                break;
            }

            if !is_sym_key(&record.key) {
                summary.ignored_non_sym += 1;
                continue;
            }

            let normalized = normalize_key(&record.key);
            let key = resume_key_from(normalized)?;

            if !is_recordable(&key) {
                warn!(
                    "Skipping {} -- key cannot be recorded in the output file",
                    normalized
                );
                summary.unrecordable_keys += 1;
                continue;
            }

            if ledger.contains(&key) {
                info!(
                    "({}/{}) Skipping {} -- already have ...",
                    summary.processed, limit, normalized
                );
                summary.already_present += 1;
                summary.processed += 1;
                continue;
            }

            let url = self.config.download_url(normalized)?;

            info!(
                "({}/{}) Checking {} ({}) ...",
                summary.processed, limit, normalized, record.created_at
            );
            let Some(sizes) = self.fetcher.fetch_sizes(&url).await? else {
                summary.failed_downloads += 1;
                continue;
            };

            let entry = ResolvedEntry {
                key,
                url: url.to_string(),
                size: sizes.decompressed,
                compressed_size: sizes.compressed,
            };
            writer.write_entry(&entry)?;
            info!(
                "{},{},{},{},{},{}",
                entry.key.module,
                entry.key.debug_id,
                entry.key.debug_filename,
                entry.url,
                entry.size,
                entry.compressed_size
            );

            ledger.record(entry.key);
            summary.downloaded += 1;
            summary.processed += 1;
        }

        writer.close()?;
        info!("Done!");

        Ok(summary)
    }
}
