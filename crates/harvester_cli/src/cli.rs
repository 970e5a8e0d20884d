use std::path::PathBuf;

use clap::Parser;

/// Crawl a document listing page and download every linked file,
/// skipping byte-identical duplicates.
#[derive(Debug, Parser)]
#[command(name = "harvester", version, about)]
pub struct Args {
    /// Listing page to start crawling from.
    #[arg(long)]
    pub start_url: Option<String>,

    /// Directory downloaded documents are saved into.
    #[arg(long)]
    pub dest_dir: Option<PathBuf>,

    /// Stop at the start page instead of following "next" links.
    #[arg(long)]
    pub no_pagination: bool,

    /// Hard cap on listing pages fetched in one run.
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Seconds allowed for one listing page fetch.
    #[arg(long)]
    pub page_timeout: Option<u64>,

    /// Seconds allowed for one document download.
    #[arg(long)]
    pub file_timeout: Option<u64>,

    /// Config file supplying defaults for the options above.
    #[arg(long, default_value = "harvester.ron")]
    pub config: PathBuf,

    /// Print the run report as JSON instead of one path per line.
    #[arg(long)]
    pub json: bool,

    /// Also write logs to ./harvester.log.
    #[arg(long)]
    pub log_file: bool,

    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
