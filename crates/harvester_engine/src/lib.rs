//! Harvester engine: crawl listing pages and download the documents they
//! link, deduplicated by content hash.
mod decode;
mod download;
mod extract;
mod fetch;
mod frontier;
mod harvest;
mod persist;
mod types;

pub use decode::{decode_page, DecodeError, DecodedPage};
pub use download::{ContentHashIndex, DedupingDownloader, DownloadError};
pub use extract::extract_page_links;
pub use fetch::{ChunkSink, FetchSettings, Fetcher, ReqwestFetcher};
pub use frontier::{fetch_page_links, FrontierWalker, PageError, WalkOutcome};
pub use harvest::{
    DocumentHarvester, HarvestError, HarvestSettings, DEFAULT_DEST_DIR, DEFAULT_START_PAGE,
};
pub use persist::{ensure_output_dir, unique_destination, PersistError};
pub use types::{
    DownloadOutcome, FailureKind, FetchError, FetchedPage, HarvestReport, PageLinks,
};
