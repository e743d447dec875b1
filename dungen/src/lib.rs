//! Procedural generation of 3D dungeon layouts.
//!
//! A dungeon is a set of grid-aligned rooms, called *chunks*, connected into an undirected
//! [`Graph`](graph::Graph) keyed by their grid coordinates. Dungeons are grown by a
//! [`Pipeline`] which runs an ordered list of [`Rule`]s against a shared [`Dungeon`]:
//!
//! * [`rules::PathWalker`] grows a linear path of chunks by stepping in axis directions.
//! * [`rules::GridPathfinder`] connects two existing paths by a shortest route through
//!   unoccupied cells.
//! * [`rules::Resize`] gives chunks new sizes and then spaces every chunk uniformly.
//!
//! Rules communicate through chunk *categories* (string tags), the category-changed
//! notifications delivered by the pipeline, and the membership lists that path-building
//! rules publish by name.
//!
//! ```
//! use dungen::{Pipeline, PipelineConfig};
//! use dungen::rules::{PathWalker, PathWalkerConfig};
//!
//! let mut pipeline = Pipeline::new(PipelineConfig::default());
//! pipeline.add_rule(PathWalker::new(PathWalkerConfig::new("main")));
//! let report = pipeline.generate();
//! assert!(report.is_success());
//! assert!(pipeline.dungeon().chunk_count() >= 4);
//! ```

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

pub mod chunk;
pub mod config;
pub mod connector;
pub mod content;
pub mod dungeon;
pub mod graph;
pub mod listen;
pub mod pipeline;
pub mod rule;
pub mod rules;

pub use chunk::Chunk;
pub use config::{ConfigError, PipelineConfig, RuleConfig};
pub use connector::Connector;
pub use dungeon::{CategoryChanged, Dungeon, DungeonConfig};
pub use pipeline::{Diagnostic, GenerationReport, Pipeline};
pub use rule::{GenContext, GenError, Rule, RuleSettings};

/// Mathematical utilities and decisions.
pub mod math {
    pub use dungen_base::math::*;
}

/// Miscellaneous helpers.
pub mod util {
    pub use dungen_base::util::*;
}
