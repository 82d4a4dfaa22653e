use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
};

/// Target prefix shared by the library and the binary.
const CRATE_TARGET: &str = "mol2swap";

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Events kept by the log file: everything from mol2swap at `level`, and
/// nothing from dependencies.
fn file_targets(level: LevelFilter) -> Targets {
    Targets::new().with_target(CRATE_TARGET, level)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level = level_filter(verbosity, quiet);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(level);

    let subscriber = tracing_subscriber::registry().with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;

        // The file records at least INFO so a quiet run still leaves a trace.
        let file_level = level.max(LevelFilter::INFO);
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .with_filter(file_targets(file_level));

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, info};

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(2, true), LevelFilter::OFF);
    }

    #[test]
    fn file_targets_keep_only_mol2swap_events() {
        let targets = file_targets(LevelFilter::INFO);
        assert!(targets.would_enable("mol2swap::workflows::substitute", &tracing::Level::INFO));
        assert!(!targets.would_enable("mol2swap::workflows::substitute", &tracing::Level::DEBUG));
        assert!(!targets.would_enable("rayon_core", &tracing::Level::ERROR));
    }

    #[test]
    #[serial]
    fn file_layer_records_workflow_events() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("substitute.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_ids(true)
            .with_filter(file_targets(LevelFilter::DEBUG));
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            info!(target: "mol2swap::workflows::substitute", "3 variant(s) written.");
            debug!(target: "mol2swap::engine::variants", "Emitting variant 0.");
            info!(target: "indicatif", "Dependency chatter.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("3 variant(s) written."));
        assert!(content.contains("Emitting variant 0."));
        assert!(!content.contains("Dependency chatter."));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
