mod cli;
mod config;
mod logging;

use clap::Parser;
use harvest_logging::harvest_info;
use harvester_engine::{DocumentHarvester, ReqwestFetcher};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logging::initialize(args.verbose, args.log_file);

    let file = config::load(&args.config);
    let (harvest_settings, fetch_settings) = config::resolve(&args, &file);
    harvest_info!(
        "harvesting {} into {}",
        harvest_settings.start_url,
        harvest_settings.dest_dir.display()
    );

    let started_utc = chrono::Utc::now();
    let runtime = tokio::runtime::Runtime::new()?;
    let fetcher = ReqwestFetcher::new(fetch_settings);
    let harvester = DocumentHarvester::new(&fetcher, harvest_settings);
    let report = runtime.block_on(harvester.run())?;

    if args.json {
        let payload = serde_json::json!({
            "started_utc": started_utc.to_rfc3339(),
            "finished_utc": chrono::Utc::now().to_rfc3339(),
            "saved": report
                .saved
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>(),
            "pages_visited": report.pages_visited,
            "files_discovered": report.files_discovered,
            "duplicates_skipped": report.duplicates_skipped,
            "failed_pages": report.failed_pages,
            "failed_downloads": report.failed_downloads,
        });
        println!("{payload}");
    } else {
        // One path per line, ready for the document pipeline to consume.
        for path in &report.saved {
            println!("{}", path.display());
        }
    }
    Ok(())
}
