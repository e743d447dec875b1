//! Logging to stderr.

use anyhow::Context as _;
use log::Log as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
#[allow(clippy::module_name_repetitions)]
pub struct LoggingArgs {
    /// Additional logging to stderr.
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are deterministic.
    ///
    /// This option is intended for tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub(crate) simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
pub fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    log::set_boxed_logger(Box::new(DungenLogger::new(options)))
        .context("failed to initialize logging")?;
    log::set_max_level(max_level(options));
    Ok(())
}

fn max_level(options: &LoggingArgs) -> log::LevelFilter {
    if options.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    }
}

/// [`log::Log`] implementation that [`install()`] registers globally.
struct DungenLogger {
    stderr_logger: simplelog::WriteLogger<std::io::Stderr>,
}

impl DungenLogger {
    fn new(options: &LoggingArgs) -> Self {
        use log::LevelFilter::{Error, Off};

        let stderr_logger = *simplelog::WriteLogger::new(
            max_level(options),
            // Note: This has no target filters because `DungenLogger` calls
            // `util::log::standard_filter` to do it.
            simplelog::ConfigBuilder::new()
                .set_target_level(Off)
                .set_location_level(Off)
                .set_time_level(if options.simplify_log_format { Off } else { Error })
                .build(),
            std::io::stderr(),
        );
        Self { stderr_logger }
    }
}

impl log::Log for DungenLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        dungen::util::log::standard_filter(metadata) && self.stderr_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if !dungen::util::log::standard_filter(record.metadata()) {
            return;
        }
        self.stderr_logger.log(record);
    }

    fn flush(&self) {
        self.stderr_logger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: bool) -> LoggingArgs {
        LoggingArgs {
            verbose,
            simplify_log_format: true,
        }
    }

    #[test]
    fn verbose_enables_trace() {
        let metadata = log::Metadata::builder()
            .target("dungen::pipeline")
            .level(log::Level::Trace)
            .build();
        assert!(!DungenLogger::new(&args(false)).enabled(&metadata));
        assert!(DungenLogger::new(&args(true)).enabled(&metadata));
    }

    #[test]
    fn lattice_details_are_filtered() {
        let metadata = log::Metadata::builder()
            .target(dungen::util::log::LATTICE_TARGET)
            .level(log::Level::Trace)
            .build();
        assert!(!DungenLogger::new(&args(true)).enabled(&metadata));
    }
}
