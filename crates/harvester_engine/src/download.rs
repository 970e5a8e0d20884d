use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;
use url::Url;

use harvest_logging::{harvest_debug, harvest_error, harvest_info, harvest_warn};
use harvester_core::filename_from_url;

use crate::fetch::{ChunkSink, Fetcher};
use crate::persist::unique_destination;
use crate::types::{DownloadOutcome, FetchError};

const HASH_BUF_BYTES: usize = 8192;

/// Why one document URL produced no saved file.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("file url did not parse: {0}")]
    InvalidUrl(String),
    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Content digest -> first path saved with that content.
///
/// This is what makes two URLs serving identical bytes land as one file,
/// and what makes a rerun against a populated directory write nothing new.
#[derive(Debug, Default)]
pub struct ContentHashIndex {
    by_digest: HashMap<String, PathBuf>,
}

impl ContentHashIndex {
    /// Index every regular file already present in `dir`. Files that
    /// cannot be read are logged and left out of the index.
    pub fn scan_dir(dir: &Path) -> io::Result<Self> {
        let mut index = Self::default();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match hash_file(&path) {
                Ok(digest) => {
                    index.insert(digest, path);
                }
                Err(err) => {
                    harvest_warn!("not indexing unreadable file {}: {err}", path.display());
                }
            }
        }
        harvest_debug!("content index preloaded with {} entries", index.len());
        Ok(index)
    }

    pub fn get(&self, digest: &str) -> Option<&Path> {
        self.by_digest.get(digest).map(PathBuf::as_path)
    }

    pub fn insert(&mut self, digest: String, path: PathBuf) {
        self.by_digest.insert(digest, path);
    }

    pub fn len(&self) -> usize {
        self.by_digest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_digest.is_empty()
    }
}

/// Downloads each unique document URL once, writing at most one file per
/// distinct content digest into the destination directory.
pub struct DedupingDownloader<'a> {
    fetcher: &'a dyn Fetcher,
    dest_dir: PathBuf,
    index: ContentHashIndex,
}

impl<'a> DedupingDownloader<'a> {
    /// The destination directory must exist; `index` is typically the
    /// result of [`ContentHashIndex::scan_dir`] over it.
    pub fn new(fetcher: &'a dyn Fetcher, dest_dir: PathBuf, index: ContentHashIndex) -> Self {
        Self {
            fetcher,
            dest_dir,
            index,
        }
    }

    /// Fetch every URL in iteration order. A failed URL is logged and
    /// skipped; it is simply absent from the outcomes.
    pub async fn download_all(
        &mut self,
        urls: impl IntoIterator<Item = String>,
    ) -> (Vec<DownloadOutcome>, usize) {
        let mut outcomes = Vec::new();
        let mut failures = 0usize;
        for url in urls {
            match self.download_one(&url).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    failures += 1;
                    harvest_error!("failed to download {url}: {err}");
                }
            }
        }
        (outcomes, failures)
    }

    /// Stream one document into a scratch file, digesting the same bytes
    /// that land on disk, then either adopt the already-saved file for
    /// that digest or move the scratch file to its final name.
    pub async fn download_one(&mut self, url: &str) -> Result<DownloadOutcome, DownloadError> {
        let parsed = Url::parse(url).map_err(|err| DownloadError::InvalidUrl(err.to_string()))?;

        let mut scratch = HashingScratch::new_in(&self.dest_dir)?;
        let received = self.fetcher.fetch_file(url, &mut scratch).await?;
        let (scratch_file, digest) = scratch.finish();

        if let Some(existing) = self.index.get(&digest) {
            harvest_info!(
                "content duplicate, keeping {} for {url}",
                existing.display()
            );
            // Dropping the scratch file removes it.
            return Ok(DownloadOutcome::Duplicate(existing.to_path_buf()));
        }

        let target = unique_destination(&self.dest_dir, &filename_from_url(&parsed));
        scratch_file
            .persist(&target)
            .map_err(|err| DownloadError::Io(err.error))?;
        harvest_debug!("saved {received} bytes to {}", target.display());
        self.index.insert(digest, target.clone());
        Ok(DownloadOutcome::Saved(target))
    }
}

/// Scratch file that digests every byte as it lands, so the recorded
/// hash is computed from exactly the content on disk.
struct HashingScratch {
    file: NamedTempFile,
    hasher: Sha256,
}

impl HashingScratch {
    fn new_in(dir: &Path) -> io::Result<Self> {
        Ok(Self {
            file: NamedTempFile::new_in(dir)?,
            hasher: Sha256::new(),
        })
    }

    fn finish(self) -> (NamedTempFile, String) {
        (self.file, hex_digest(self.hasher))
    }
}

impl ChunkSink for HashingScratch {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk)?;
        self.hasher.update(chunk);
        Ok(())
    }
}

fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; HASH_BUF_BYTES];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex_digest(hasher))
}

fn hex_digest(hasher: Sha256) -> String {
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
