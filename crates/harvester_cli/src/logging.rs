//! Logger initialization for the harvester binary.
//!
//! Log output goes to stderr so stdout stays clean for the path report.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "harvester.log";

/// Initialize the global logger; `verbosity` counts `-v` flags.
pub fn initialize(verbosity: u8, log_to_file: bool) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let log_path = PathBuf::from(LOG_FILENAME);
        match File::create(&log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => {
                eprintln!("Warning: could not create log file at {log_path:?}: {err}");
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}
