//! Serializable description of a [`Pipeline`](crate::Pipeline) and its rules.
//!
//! A configuration file is a JSON object such as:
//!
//! ```json
//! {
//!     "seed": 42,
//!     "chunk_size": [5.0, 1.0, 5.0],
//!     "rules": [
//!         { "type": "path_walker", "name": "main", "direction": "random" },
//!         { "type": "resize", "name": "rooms", "sizes": [[10.0, 5.0, 10.0]] }
//!     ]
//! }
//! ```
//!
//! Every field other than each rule's `type` and `name` has a default.

use crate::math::{FreeVector, GridPoint};
use crate::rules::{GridPathfinderConfig, PathWalkerConfig, ResizeConfig};
use crate::rules::{GridPathfinder, PathWalker, Resize};
use crate::{DungeonConfig, Rule};

/// Everything needed to construct a [`Pipeline`](crate::Pipeline).
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[expect(clippy::exhaustive_structs)]
pub struct PipelineConfig {
    /// Parameters applying to every chunk and connector.
    #[serde(flatten)]
    pub dungeon: DungeonConfig,
    /// Master seed shared by every rule.
    pub seed: u64,
    /// If true, a fresh seed is drawn for every run and `seed` is ignored.
    pub randomize_seed: bool,
    /// Rules to run, in order.
    pub rules: Vec<RuleConfig>,
}

/// Configuration of one rule, tagged with its kind.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RuleConfig {
    /// See [`PathWalker`].
    PathWalker(PathWalkerConfig),
    /// See [`GridPathfinder`].
    GridPathfinder(GridPathfinderConfig),
    /// See [`Resize`].
    Resize(ResizeConfig),
}

impl RuleConfig {
    /// The name of the configured rule.
    pub fn name(&self) -> &str {
        match self {
            RuleConfig::PathWalker(c) => &c.name,
            RuleConfig::GridPathfinder(c) => &c.name,
            RuleConfig::Resize(c) => &c.name,
        }
    }

    /// Constructs the configured rule.
    pub fn into_rule(self) -> Box<dyn Rule> {
        match self {
            RuleConfig::PathWalker(c) => Box::new(PathWalker::new(c)),
            RuleConfig::GridPathfinder(c) => Box::new(GridPathfinder::new(c)),
            RuleConfig::Resize(c) => Box::new(Resize::new(c)),
        }
    }
}

impl From<PathWalkerConfig> for RuleConfig {
    fn from(value: PathWalkerConfig) -> Self {
        RuleConfig::PathWalker(value)
    }
}
impl From<GridPathfinderConfig> for RuleConfig {
    fn from(value: GridPathfinderConfig) -> Self {
        RuleConfig::GridPathfinder(value)
    }
}
impl From<ResizeConfig> for RuleConfig {
    fn from(value: ResizeConfig) -> Self {
        RuleConfig::Resize(value)
    }
}

/// A configuration value, or a reference between rules, that cannot be used.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The default chunk size is not positive and finite on every axis.
    #[error("chunk size must be positive and finite on every axis, not {0:?}")]
    NonPositiveChunkSize(FreeVector),

    /// A coordinate lies outside [`GridAab::EVERYWHERE`](crate::math::GridAab::EVERYWHERE).
    #[error("coordinate {0:?} is at the limit of the grid")]
    CoordinateOutOfRange(GridPoint),

    /// A `min`/`max` pair describes no values.
    #[error("{parameter} range {min}..{max} is empty")]
    EmptyRange {
        /// Which parameter.
        parameter: &'static str,
        #[allow(missing_docs)]
        min: usize,
        #[allow(missing_docs)]
        max: usize,
    },

    /// A path rule was told to start from its own path.
    #[error("rule {0:?} cannot start from its own path")]
    SelfReference(String),

    /// No rule has published a path with this name.
    #[error("there is no path named {0:?}")]
    UnknownPath(String),

    /// A path has no member at the chosen index.
    #[error("path {path:?} has {len} chunks; index {index} is out of range")]
    IndexOutOfRange {
        #[allow(missing_docs)]
        path: String,
        #[allow(missing_docs)]
        index: usize,
        #[allow(missing_docs)]
        len: usize,
    },

    /// A path has no members at all.
    #[error("path {0:?} contains no chunks")]
    EmptyPath(String),

    /// A resize rule has no sizes to choose from.
    #[error("no sizes specified")]
    NoSizes,

    /// Two rules have the same name.
    #[error("more than one rule is named {0:?}")]
    DuplicateRuleName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GridPoint;
    use crate::rules::{LatticeMode, PathDirection, PathStart};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.dungeon.chunk_size, FreeVector::new(5.0, 1.0, 5.0));
    }

    #[test]
    fn parse_rules() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{
                "seed": 7,
                "chunk_offset": [2.0, 0.0, 2.0],
                "rules": [
                    {
                        "type": "path_walker",
                        "name": "main",
                        "direction": "random",
                        "start": { "coordinates": [1, 0, 0] },
                        "stop_on_error": false
                    },
                    {
                        "type": "path_walker",
                        "name": "branch",
                        "start": { "path": { "path": "main", "min_index": 1, "max_index": 3 } }
                    },
                    {
                        "type": "grid_pathfinder",
                        "name": "loop",
                        "start_path": "main",
                        "end_path": "branch",
                        "mode": "volume",
                        "muted": true
                    },
                    { "type": "resize", "name": "rooms" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.dungeon.chunk_offset, FreeVector::new(2.0, 0.0, 2.0));
        let names: Vec<&str> = config.rules.iter().map(RuleConfig::name).collect();
        assert_eq!(names, ["main", "branch", "loop", "rooms"]);

        let RuleConfig::PathWalker(main) = &config.rules[0] else {
            panic!("wrong kind {:?}", config.rules[0]);
        };
        assert_eq!(main.direction, PathDirection::Random);
        assert_eq!(main.start, PathStart::Coordinates(GridPoint::new(1, 0, 0)));
        assert!(!main.settings.stop_on_error);
        assert_eq!((main.min_length, main.max_length), (3, 5));

        let RuleConfig::PathWalker(branch) = &config.rules[1] else {
            panic!("wrong kind {:?}", config.rules[1]);
        };
        assert_eq!(
            branch.start,
            PathStart::Path {
                path: "main".into(),
                min_index: 1,
                max_index: 3
            }
        );

        let RuleConfig::GridPathfinder(lp) = &config.rules[2] else {
            panic!("wrong kind {:?}", config.rules[2]);
        };
        assert_eq!(lp.mode, LatticeMode::Volume);
        assert_eq!(lp.category, "path:loop");
        assert_eq!(lp.padding, 2);
        assert!(lp.settings.muted);

        let RuleConfig::Resize(rooms) = &config.rules[3] else {
            panic!("wrong kind {:?}", config.rules[3]);
        };
        assert_eq!(rooms.sizes, [FreeVector::new(10.0, 5.0, 10.0)]);
    }

    #[test]
    fn rule_without_name_is_rejected() {
        let result: Result<PipelineConfig, _> =
            serde_json::from_str(r#"{ "rules": [{ "type": "resize" }] }"#);
        assert!(result.is_err());
    }
}
