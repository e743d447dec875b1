use rand::seq::SliceRandom as _;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::config::ConfigError;
use crate::math::{Face6, GridAab, GridPoint, adjacent_cube};
use crate::{CategoryChanged, GenContext, GenError, Rule, RuleSettings};

/// Configuration of a [`PathWalker`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[expect(clippy::exhaustive_structs)]
pub struct PathWalkerConfig {
    /// Name of the rule, under which its path is published.
    pub name: String,
    #[allow(missing_docs)]
    #[serde(flatten)]
    pub settings: RuleSettings,
    /// Category given to every chunk of the path.
    #[serde(default = "default_category")]
    pub category: String,
    /// What to do on reaching a chunk that already belongs to a path.
    #[serde(default)]
    pub conflict: ConflictStrategy,
    /// Direction of every step.
    #[serde(default)]
    pub direction: PathDirection,
    /// Minimum number of steps, inclusive.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Maximum number of steps, inclusive.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Where the path begins.
    #[serde(default)]
    pub start: PathStart,
}

fn default_category() -> String {
    "path:main".into()
}
fn default_min_length() -> usize {
    3
}
fn default_max_length() -> usize {
    5
}

impl PathWalkerConfig {
    /// Returns the default configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: RuleSettings::default(),
            category: default_category(),
            conflict: ConflictStrategy::default(),
            direction: PathDirection::default(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            start: PathStart::default(),
        }
    }
}

/// What a [`PathWalker`] does when its next chunk already belongs to a path.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[expect(clippy::exhaustive_enums)]
pub enum ConflictStrategy {
    /// Link to that chunk and keep walking from it.
    #[default]
    Connect,
    /// Try the next candidate direction instead.
    Stop,
}

/// The direction a [`PathWalker`] steps in.
///
/// Forward is +Z and Right is +X.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
#[expect(clippy::exhaustive_enums)]
pub enum PathDirection {
    #[default]
    Forward,
    Right,
    Backward,
    Left,
    Up,
    Down,
    /// Every step tries all six directions in a random order.
    Random,
}

/// Faces of the fixed directions in declaration order, before shuffling.
const RANDOM_CANDIDATES: [Face6; 6] = [
    Face6::PZ,
    Face6::PX,
    Face6::NZ,
    Face6::NX,
    Face6::PY,
    Face6::NY,
];

impl PathDirection {
    /// Returns the face this direction steps through, or [`None`] for [`Self::Random`].
    pub fn face(self) -> Option<Face6> {
        match self {
            Self::Forward => Some(Face6::PZ),
            Self::Right => Some(Face6::PX),
            Self::Backward => Some(Face6::NZ),
            Self::Left => Some(Face6::NX),
            Self::Up => Some(Face6::PY),
            Self::Down => Some(Face6::NY),
            Self::Random => None,
        }
    }
}

/// Where a [`PathWalker`]'s path begins.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[expect(clippy::exhaustive_enums)]
pub enum PathStart {
    /// At a fixed coordinate, which must not already belong to a path.
    ///
    /// No coordinate may equal [`GridCoordinate::MAX`](crate::math::GridCoordinate).
    Coordinates(GridPoint),
    /// At a member of another rule's path, chosen by an index drawn from
    /// `min_index..max_index` (exclusive of `max_index`).
    Path {
        /// Name of the rule whose path to start from.
        path: String,
        #[allow(missing_docs)]
        min_index: usize,
        #[allow(missing_docs)]
        max_index: usize,
    },
}

impl Default for PathStart {
    fn default() -> Self {
        PathStart::Coordinates(GridPoint::origin())
    }
}

/// Grows one linear path of chunks by stepping in axis directions.
///
/// Each chunk of the path is tagged with the configured category and the path's members
/// are published under the rule's name, so that other rules can start from or connect to
/// it. Once the path is built, the rule also adopts any chunk that later gains its
/// category next to an existing chunk of that category, linking the two.
#[derive(Debug)]
pub struct PathWalker {
    config: PathWalkerConfig,
    rng: Xoshiro256Plus,
    members: Vec<GridPoint>,
    /// Whether category changes should be acted on; set once the path is built.
    merging: bool,
}

impl PathWalker {
    #[allow(missing_docs)]
    pub fn new(config: PathWalkerConfig) -> Self {
        Self {
            config,
            rng: Xoshiro256Plus::seed_from_u64(0),
            members: Vec::new(),
            merging: false,
        }
    }

    /// The chunks of this rule's path, in the order they joined it.
    pub fn members(&self) -> &[GridPoint] {
        &self.members
    }

    fn find_start(&mut self, ctx: &mut GenContext<'_>) -> Result<GridPoint, GenError> {
        match &self.config.start {
            &PathStart::Coordinates(coord) => {
                if !GridAab::EVERYWHERE.contains_cube(coord) {
                    return Err(ConfigError::CoordinateOutOfRange(coord).into());
                }
                ctx.dungeon_mut().get_or_create_chunk_at(coord);
                if ctx.dungeon().graph().has_neighbors(&coord) {
                    return Err(GenError::StartConflict { coord });
                }
                Ok(coord)
            }
            PathStart::Path {
                path,
                min_index,
                max_index,
            } => {
                if *path == self.config.name {
                    return Err(ConfigError::SelfReference(path.clone()).into());
                }
                if min_index >= max_index {
                    return Err(ConfigError::EmptyRange {
                        parameter: "start index",
                        min: *min_index,
                        max: *max_index,
                    }
                    .into());
                }
                let members = ctx
                    .path(path)
                    .ok_or_else(|| ConfigError::UnknownPath(path.clone()))?;
                let index = self.rng.random_range(*min_index..*max_index);
                members.get(index).copied().ok_or_else(|| {
                    ConfigError::IndexOutOfRange {
                        path: path.clone(),
                        index,
                        len: members.len(),
                    }
                    .into()
                })
            }
        }
    }

    /// Picks the chunk after `current`, returning it and whether it already belonged to
    /// a path.
    fn find_next(
        &mut self,
        ctx: &GenContext<'_>,
        current: GridPoint,
    ) -> Result<(GridPoint, bool), GenError> {
        let candidates: Vec<Face6> = match self.config.direction.face() {
            Some(face) => vec![face],
            None => {
                let mut faces = RANDOM_CANDIDATES;
                faces.shuffle(&mut self.rng);
                faces.to_vec()
            }
        };

        for face in candidates {
            let Some(next) = adjacent_cube(current, face) else {
                continue;
            };
            let conflict = ctx.dungeon().graph().has_neighbors(&next);
            match (conflict, self.config.conflict) {
                (false, _) => return Ok((next, false)),
                (true, ConflictStrategy::Connect) => return Ok((next, true)),
                (true, ConflictStrategy::Stop) => continue,
            }
        }
        Err(GenError::NoRouteFound { from: current })
    }

    fn mark(&mut self, ctx: &mut GenContext<'_>, coord: GridPoint) {
        if !self.members.contains(&coord) {
            self.members.push(coord);
        }
        ctx.dungeon_mut().add_category(coord, &self.config.category);
    }
}

impl Rule for PathWalker {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn settings(&self) -> RuleSettings {
        self.config.settings
    }

    fn initialize(&mut self, ctx: &mut GenContext<'_>) {
        self.rng = ctx.rng();
        self.members.clear();
        self.merging = false;
        ctx.publish_path(&self.config.name, &[]);
    }

    fn generate(&mut self, ctx: &mut GenContext<'_>) -> Result<(), GenError> {
        let PathWalkerConfig {
            min_length,
            max_length,
            ..
        } = self.config;
        if min_length > max_length {
            return Err(ConfigError::EmptyRange {
                parameter: "path length",
                min: min_length,
                max: max_length,
            }
            .into());
        }

        self.members.clear();
        let length = self.rng.random_range(min_length..=max_length);
        let start = self.find_start(ctx)?;
        self.mark(ctx, start);

        let mut current = start;
        for _ in 0..length {
            let found = self.find_next(ctx, current);
            let (next, joined_existing) = match found {
                Ok(step) => step,
                Err(error) => {
                    ctx.publish_path(&self.config.name, &self.members);
                    return Err(error);
                }
            };
            if joined_existing {
                log::debug!(
                    "[{name}] joined an existing path at {next:?}",
                    name = self.config.name
                );
            }
            ctx.dungeon_mut().add_edge(current, next);
            self.mark(ctx, next);
            current = next;
        }

        ctx.publish_path(&self.config.name, &self.members);
        self.merging = true;
        Ok(())
    }

    fn on_category_changed(&mut self, ctx: &mut GenContext<'_>, change: &CategoryChanged) {
        if !self.merging
            || change.category != self.config.category
            || self.members.contains(&change.coord)
        {
            return;
        }

        let same_category: Vec<GridPoint> = ctx
            .dungeon()
            .adjacent_chunks(change.coord)
            .filter(|&neighbor| {
                ctx.dungeon()
                    .chunk(neighbor)
                    .is_some_and(|chunk| chunk.has_category(&self.config.category))
            })
            .collect();
        if same_category.is_empty() {
            return;
        }
        for neighbor in same_category {
            ctx.dungeon_mut().add_edge(neighbor, change.coord);
        }
        self.mark(ctx, change.coord);
        ctx.publish_path(&self.config.name, &self.members);
    }
}
