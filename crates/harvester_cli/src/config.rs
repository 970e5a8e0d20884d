use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use harvest_logging::{harvest_debug, harvest_warn};
use harvester_engine::{FetchSettings, HarvestSettings};
use serde::Deserialize;

use crate::cli::Args;

/// Optional RON file supplying run defaults; CLI flags win over it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub start_url: Option<String>,
    pub dest_dir: Option<PathBuf>,
    pub follow_pagination: Option<bool>,
    pub max_pages: Option<usize>,
    pub page_timeout_secs: Option<u64>,
    pub file_timeout_secs: Option<u64>,
}

/// A missing or unreadable config file is not an error; the run proceeds
/// on built-in defaults.
pub fn load(path: &Path) -> ConfigFile {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            harvest_debug!("no config file at {}", path.display());
            return ConfigFile::default();
        }
        Err(err) => {
            harvest_warn!("failed to read config {}: {}", path.display(), err);
            return ConfigFile::default();
        }
    };
    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            harvest_warn!("failed to parse config {}: {}", path.display(), err);
            ConfigFile::default()
        }
    }
}

/// Merge precedence: CLI flag, then config file, then built-in default.
pub fn resolve(args: &Args, file: &ConfigFile) -> (HarvestSettings, FetchSettings) {
    let defaults = HarvestSettings::default();
    let harvest = HarvestSettings {
        start_url: args
            .start_url
            .clone()
            .or_else(|| file.start_url.clone())
            .unwrap_or(defaults.start_url),
        dest_dir: args
            .dest_dir
            .clone()
            .or_else(|| file.dest_dir.clone())
            .unwrap_or(defaults.dest_dir),
        follow_pagination: if args.no_pagination {
            false
        } else {
            file.follow_pagination.unwrap_or(defaults.follow_pagination)
        },
        max_pages: args.max_pages.or(file.max_pages).unwrap_or(defaults.max_pages),
    };

    let mut fetch = FetchSettings::default();
    if let Some(secs) = args.page_timeout.or(file.page_timeout_secs) {
        fetch.page_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = args.file_timeout.or(file.file_timeout_secs) {
        fetch.file_timeout = Duration::from_secs(secs);
    }

    (harvest, fetch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use harvester_engine::DEFAULT_START_PAGE;
    use tempfile::TempDir;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("harvester").chain(argv.iter().copied()))
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let file = load(&dir.path().join("absent.ron"));
        let (harvest, fetch) = resolve(&args(&[]), &file);

        assert_eq!(harvest.start_url, DEFAULT_START_PAGE);
        assert!(harvest.follow_pagination);
        assert_eq!(harvest.max_pages, 50);
        assert_eq!(fetch.page_timeout, Duration::from_secs(20));
        assert_eq!(fetch.file_timeout, Duration::from_secs(60));
    }

    #[test]
    fn config_file_values_apply_when_flags_are_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("harvester.ron");
        fs::write(
            &path,
            r#"(
    start_url: Some("https://example.org/listing"),
    max_pages: Some(3),
    file_timeout_secs: Some(120),
)"#,
        )
        .unwrap();

        let (harvest, fetch) = resolve(&args(&[]), &load(&path));

        assert_eq!(harvest.start_url, "https://example.org/listing");
        assert_eq!(harvest.max_pages, 3);
        assert_eq!(fetch.file_timeout, Duration::from_secs(120));
    }

    #[test]
    fn flags_win_over_the_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("harvester.ron");
        fs::write(
            &path,
            r#"(
    start_url: Some("https://example.org/listing"),
    max_pages: Some(3),
    follow_pagination: Some(true),
)"#,
        )
        .unwrap();

        let (harvest, _) = resolve(
            &args(&["--start-url", "https://other.example.org", "--max-pages", "7", "--no-pagination"]),
            &load(&path),
        );

        assert_eq!(harvest.start_url, "https://other.example.org");
        assert_eq!(harvest.max_pages, 7);
        assert!(!harvest.follow_pagination);
    }

    #[test]
    fn malformed_config_is_ignored_with_a_warning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("harvester.ron");
        fs::write(&path, "this is not ron").unwrap();

        let (harvest, _) = resolve(&args(&[]), &load(&path));
        assert_eq!(harvest.start_url, DEFAULT_START_PAGE);
    }
}
