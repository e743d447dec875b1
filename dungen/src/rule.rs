//! The [`Rule`] trait and the context rules run in.

use std::fmt;

use hashbrown::HashMap;
use rand::SeedableRng as _;
use rand_xoshiro::Xoshiro256Plus;

use crate::config::ConfigError;
use crate::math::GridPoint;
use crate::rules::LatticeMode;
use crate::{CategoryChanged, Dungeon};

/// A step of dungeon generation, run by a [`Pipeline`](crate::Pipeline).
///
/// Every run first calls [`Rule::initialize()`] on all active rules, in order, and then
/// [`Rule::generate()`] on each of them in order. After each `generate`, the category
/// changes it caused are delivered to every active rule through
/// [`Rule::on_category_changed()`], until no more changes are pending.
pub trait Rule: fmt::Debug {
    /// Name used in diagnostics and to refer to this rule from other rules.
    fn name(&self) -> &str;

    /// Flags controlling how the pipeline treats this rule.
    fn settings(&self) -> RuleSettings;

    /// Reset all state from any previous run.
    ///
    /// Rules which need randomness should take a fresh generator from
    /// [`GenContext::rng()`] here, so that every rule's sequence depends only on the seed.
    fn initialize(&mut self, ctx: &mut GenContext<'_>);

    /// Perform this rule's step.
    fn generate(&mut self, ctx: &mut GenContext<'_>) -> Result<(), GenError>;

    /// React to a chunk gaining a category. The default implementation does nothing.
    fn on_category_changed(&mut self, ctx: &mut GenContext<'_>, change: &CategoryChanged) {
        _ = (ctx, change);
    }
}

/// Flags shared by every kind of rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[expect(clippy::exhaustive_structs)]
pub struct RuleSettings {
    /// If true, the rule is left out of the run entirely.
    pub muted: bool,
    /// If true, a failure of this rule stops the run; otherwise it is only reported.
    pub stop_on_error: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            muted: false,
            stop_on_error: true,
        }
    }
}

/// Reasons a [`Rule`] can fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GenError {
    /// The rule's parameters, or the rules it refers to, cannot be used.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A path was asked to start at a chunk that already belongs to a path.
    #[error("start chunk at {coord:?} is already connected to a path")]
    StartConflict {
        /// Coordinate of the start chunk.
        coord: GridPoint,
    },

    /// No way forward could be found.
    #[error("could not find a route onward from {from:?}")]
    NoRouteFound {
        /// The last chunk successfully reached.
        from: GridPoint,
    },

    /// The graph has more than one connected component.
    #[error("not all chunks are connected: {reached} of {total} reachable")]
    DisconnectedGraph {
        /// Number of chunks reachable from the first chunk.
        reached: usize,
        /// Number of chunks in total.
        total: usize,
    },

    /// An endpoint is outside the lattice allowed by the axis mode.
    #[error("endpoint {coord:?} is outside the {mode} lattice")]
    LatticeExclusion {
        /// The endpoint which was excluded.
        coord: GridPoint,
        /// The axis mode in use.
        mode: LatticeMode,
    },
}

/// Membership lists published by path-building rules, keyed by rule name.
pub type PathRegistry = HashMap<String, Vec<GridPoint>>;

/// Everything a [`Rule`] may use while it runs.
#[derive(Debug)]
pub struct GenContext<'a> {
    dungeon: &'a mut Dungeon,
    seed: u64,
    paths: &'a mut PathRegistry,
}

impl<'a> GenContext<'a> {
    pub(crate) fn new(dungeon: &'a mut Dungeon, seed: u64, paths: &'a mut PathRegistry) -> Self {
        Self {
            dungeon,
            seed,
            paths,
        }
    }

    /// The dungeon being generated.
    pub fn dungeon(&self) -> &Dungeon {
        &*self.dungeon
    }

    /// The dungeon being generated.
    pub fn dungeon_mut(&mut self) -> &mut Dungeon {
        &mut *self.dungeon
    }

    /// The master seed of this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a new random generator seeded with the master seed.
    ///
    /// Every call returns a generator producing the same sequence.
    pub fn rng(&self) -> Xoshiro256Plus {
        Xoshiro256Plus::seed_from_u64(self.seed)
    }

    /// Returns the membership list published under `name`, or [`None`] if no rule
    /// has published one.
    pub fn path(&self, name: &str) -> Option<&[GridPoint]> {
        self.paths.get(name).map(Vec::as_slice)
    }

    /// Replaces the membership list published under `name`.
    pub fn publish_path(&mut self, name: &str, members: &[GridPoint]) {
        let list = self.paths.entry_ref(name).or_default();
        list.clear();
        list.extend_from_slice(members);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng as _;

    #[test]
    fn rng_depends_only_on_seed() {
        let mut dungeon = Dungeon::default();
        let mut paths = PathRegistry::new();
        let ctx = GenContext::new(&mut dungeon, 1234, &mut paths);
        let a: u64 = ctx.rng().random();
        let b: u64 = ctx.rng().random();
        assert_eq!(a, b);
        assert_eq!(a, Xoshiro256Plus::seed_from_u64(1234).random::<u64>());
    }

    #[test]
    fn publish_path_replaces() {
        let mut dungeon = Dungeon::default();
        let mut paths = PathRegistry::new();
        let mut ctx = GenContext::new(&mut dungeon, 0, &mut paths);
        assert_eq!(ctx.path("a"), None);
        ctx.publish_path("a", &[GridPoint::new(1, 2, 3)]);
        ctx.publish_path("a", &[GridPoint::new(0, 0, 0)]);
        assert_eq!(ctx.path("a"), Some(&[GridPoint::new(0, 0, 0)][..]));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            GenError::StartConflict {
                coord: GridPoint::new(0, 0, 1)
            }
            .to_string(),
            "start chunk at (0, 0, 1) is already connected to a path"
        );
        assert_eq!(
            GenError::DisconnectedGraph {
                reached: 2,
                total: 5
            }
            .to_string(),
            "not all chunks are connected: 2 of 5 reachable"
        );
        assert_eq!(
            GenError::LatticeExclusion {
                coord: GridPoint::new(4, 0, 0),
                mode: LatticeMode::Vertical,
            }
            .to_string(),
            "endpoint (4, 0, 0) is outside the vertical lattice"
        );
    }
}
