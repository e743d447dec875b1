//! Binary which runs a dungen pipeline configuration and prints the resulting dungeon.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser as _;

use dungen_cli::{build_pipeline, load_config, logging, output};

mod command_options;
use command_options::DungenArgs;

fn main() -> Result<ExitCode, anyhow::Error> {
    // Destructure as a check that we're using all the args
    let DungenArgs {
        config_file,
        seed,
        randomize_seed,
        output: output_format,
        logging: logging_args,
    } = DungenArgs::parse();

    logging::install(&logging_args)?;

    let config = load_config(&config_file)?;
    let mut pipeline = build_pipeline(config, seed, randomize_seed)?;
    log::info!(
        "running {count} rules from {path}",
        count = pipeline.rules().count(),
        path = config_file.display()
    );

    let report = pipeline.generate();

    let mut stdout = std::io::stdout().lock();
    output::write_report(&mut stdout, output_format, pipeline.dungeon(), &report)?;
    stdout.flush()?;

    Ok(if report.stopped {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
