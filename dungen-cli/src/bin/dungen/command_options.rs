//! Command line option parsing.

use std::path::PathBuf;

use clap::Parser;

use dungen_cli::logging::LoggingArgs;
use dungen_cli::output::OutputFormat;

#[derive(Clone, Debug, Parser)]
#[command(name = "dungen", author, about, version)]
pub(crate) struct DungenArgs {
    /// Pipeline configuration file (JSON).
    #[arg(value_name = "CONFIG")]
    pub(crate) config_file: PathBuf,

    /// Seed for every randomized choice, overriding the configuration file.
    ///
    /// May be an integer between 0 and 18446744073709551615 (2⁶⁴ - 1).
    #[arg(long = "seed", conflicts_with = "randomize_seed")]
    pub(crate) seed: Option<u64>,

    /// Use a randomly chosen seed, which will be printed in the report.
    #[arg(long = "randomize-seed")]
    pub(crate) randomize_seed: bool,

    /// What to print once generation has finished.
    #[arg(long = "output", short = 'o', value_enum, default_value = "summary")]
    pub(crate) output: OutputFormat,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
