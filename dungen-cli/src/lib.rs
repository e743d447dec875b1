//! Components of the `dungen` command-line program: loading a pipeline configuration,
//! running it, and reporting the result.
//!
//! This library is not intended to be used by other programs.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use anyhow::Context as _;

use dungen::{Pipeline, PipelineConfig};

pub mod logging;
pub mod output;

/// Reads a [`PipelineConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, anyhow::Error> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse configuration file {}", path.display()))
}

/// Builds a [`Pipeline`] from `config`, with the seed options given on the command line
/// taking precedence over the file.
pub fn build_pipeline(
    mut config: PipelineConfig,
    seed: Option<u64>,
    randomize_seed: bool,
) -> Result<Pipeline, anyhow::Error> {
    if let Some(seed) = seed {
        config.seed = seed;
        config.randomize_seed = false;
    }
    if randomize_seed {
        config.randomize_seed = true;
    }
    Pipeline::from_config(config).context("invalid pipeline configuration")
}
