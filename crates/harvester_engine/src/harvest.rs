use std::path::PathBuf;

use harvest_logging::{harvest_error, harvest_info};

use crate::download::{ContentHashIndex, DedupingDownloader};
use crate::fetch::Fetcher;
use crate::frontier::FrontierWalker;
use crate::persist::{ensure_output_dir, PersistError};
use crate::types::{DownloadOutcome, HarvestReport};

/// Listing page harvested when no other start page is configured.
pub const DEFAULT_START_PAGE: &str =
    "https://www.viwanda.go.tz/documents/product-prices-domestic";

/// Directory documents land in when no other destination is configured.
pub const DEFAULT_DEST_DIR: &str = "uploads/viwanda";

/// Failures outside the per-page and per-file boundaries. These abort the
/// run; per-page and per-file errors are contained and logged instead.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error(transparent)]
    OutputDir(#[from] PersistError),
    #[error("cannot index destination directory: {0}")]
    IndexScan(#[source] std::io::Error),
}

/// Settings for one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub start_url: String,
    pub dest_dir: PathBuf,
    pub follow_pagination: bool,
    pub max_pages: usize,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_PAGE.to_string(),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            follow_pagination: true,
            max_pages: 50,
        }
    }
}

/// One crawl-then-download pipeline invocation.
///
/// Owns the visited set, the pooled URL set, and the content index for
/// the duration of a single run; nothing outlives the run except the
/// files in the destination directory.
pub struct DocumentHarvester<'a> {
    fetcher: &'a dyn Fetcher,
    settings: HarvestSettings,
}

impl<'a> DocumentHarvester<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, settings: HarvestSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Walk the pagination chain, then download every pooled URL.
    ///
    /// Partial completion is a valid outcome: pages and files that fail
    /// are logged and absent from the report. An error from outside those
    /// boundaries is logged and returned, even though some files may
    /// already have been saved.
    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        match self.run_inner().await {
            Ok(report) => {
                harvest_info!(
                    "downloaded {} files to {}",
                    report.saved.len(),
                    self.settings.dest_dir.display()
                );
                Ok(report)
            }
            Err(err) => {
                harvest_error!("harvest run failed: {err}");
                Err(err)
            }
        }
    }

    async fn run_inner(&self) -> Result<HarvestReport, HarvestError> {
        let walker = FrontierWalker::new(
            self.fetcher,
            self.settings.follow_pagination,
            self.settings.max_pages,
        );
        let walk = walker.walk(&self.settings.start_url).await;
        let files_discovered = walk.file_urls.len();
        harvest_info!(
            "walk finished: {} pages visited, {} unique file urls",
            walk.pages_visited,
            files_discovered
        );

        ensure_output_dir(&self.settings.dest_dir)?;
        let index =
            ContentHashIndex::scan_dir(&self.settings.dest_dir).map_err(HarvestError::IndexScan)?;

        let mut downloader =
            DedupingDownloader::new(self.fetcher, self.settings.dest_dir.clone(), index);
        let (outcomes, failed_downloads) = downloader.download_all(walk.file_urls).await;

        let mut saved = Vec::with_capacity(outcomes.len());
        let mut duplicates_skipped = 0usize;
        for outcome in outcomes {
            if matches!(outcome, DownloadOutcome::Duplicate(_)) {
                duplicates_skipped += 1;
            }
            saved.push(outcome.into_path());
        }

        Ok(HarvestReport {
            saved,
            pages_visited: walk.pages_visited,
            files_discovered,
            duplicates_skipped,
            failed_pages: walk.failed_pages,
            failed_downloads,
        })
    }
}
