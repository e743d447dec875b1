use std::fmt;

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::config::ConfigError;
use dungen_base::util::log::LATTICE_TARGET;

use crate::math::{Face6, GridAab, GridPoint, manhattan_length};
use crate::{GenContext, GenError, Rule, RuleSettings};

/// Configuration of a [`GridPathfinder`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[expect(clippy::exhaustive_structs)]
pub struct GridPathfinderConfig {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    #[serde(flatten)]
    pub settings: RuleSettings,
    /// Category given to every chunk of the route, including its endpoints.
    #[serde(default = "default_category")]
    pub category: String,
    /// Which axes the route may travel along.
    #[serde(default)]
    pub mode: LatticeMode,
    /// Number of cells added on every side of the dungeon's bounds to form the search space.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Name of the path the route starts from.
    pub start_path: String,
    /// Lowest index into the start path, inclusive.
    #[serde(default = "default_min_index")]
    pub start_min_index: usize,
    /// Highest index into the start path, inclusive.
    #[serde(default = "default_max_index")]
    pub start_max_index: usize,
    /// Name of the path the route ends on.
    pub end_path: String,
    /// Lowest index into the end path, inclusive.
    #[serde(default = "default_min_index")]
    pub end_min_index: usize,
    /// Highest index into the end path, inclusive.
    #[serde(default = "default_max_index")]
    pub end_max_index: usize,
}

fn default_category() -> String {
    "path:loop".into()
}
fn default_padding() -> u32 {
    2
}
fn default_min_index() -> usize {
    1
}
fn default_max_index() -> usize {
    2
}

impl GridPathfinderConfig {
    /// Returns the default configuration for a route between the two named paths.
    pub fn new(
        name: impl Into<String>,
        start_path: impl Into<String>,
        end_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            settings: RuleSettings::default(),
            category: default_category(),
            mode: LatticeMode::default(),
            padding: default_padding(),
            start_path: start_path.into(),
            start_min_index: default_min_index(),
            start_max_index: default_max_index(),
            end_path: end_path.into(),
            end_min_index: default_min_index(),
            end_max_index: default_max_index(),
        }
    }
}

/// Restricts the cells a [`GridPathfinder`] may route through.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[expect(clippy::exhaustive_enums)]
pub enum LatticeMode {
    /// Only the column of cells through the start chunk.
    Vertical,
    /// Only the horizontal layer of cells through the start chunk.
    #[default]
    Horizontal,
    /// Every cell.
    Volume,
}

impl fmt::Display for LatticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LatticeMode::Vertical => "vertical",
            LatticeMode::Horizontal => "horizontal",
            LatticeMode::Volume => "volume",
        })
    }
}

impl LatticeMode {
    /// Returns the part of `bounds` this mode permits, for a route starting at `start`.
    ///
    /// `start` must be inside `bounds`.
    fn restrict(self, bounds: GridAab, start: GridPoint) -> GridAab {
        let mut lower = bounds.lower_bounds();
        let mut upper = bounds.upper_bounds();
        match self {
            LatticeMode::Vertical => {
                (lower.x, upper.x) = (start.x, start.x + 1);
                (lower.z, upper.z) = (start.z, start.z + 1);
            }
            LatticeMode::Horizontal => {
                (lower.y, upper.y) = (start.y, start.y + 1);
            }
            LatticeMode::Volume => {}
        }
        GridAab::from_lower_upper(lower, upper)
    }
}

/// Connects a chunk of one path to a chunk of another by the shortest route through
/// unoccupied cells.
///
/// The search space is the dungeon's bounds expanded by the configured padding and
/// restricted by the [`LatticeMode`]. Every cell of the route becomes a chunk tagged with
/// the rule's category.
#[derive(Debug)]
pub struct GridPathfinder {
    config: GridPathfinderConfig,
    rng: Xoshiro256Plus,
}

impl GridPathfinder {
    #[allow(missing_docs)]
    pub fn new(config: GridPathfinderConfig) -> Self {
        Self {
            config,
            rng: Xoshiro256Plus::seed_from_u64(0),
        }
    }

    fn pick_endpoint(
        &mut self,
        ctx: &GenContext<'_>,
        path: &str,
        min_index: usize,
        max_index: usize,
    ) -> Result<GridPoint, ConfigError> {
        let members = ctx
            .path(path)
            .ok_or_else(|| ConfigError::UnknownPath(path.to_owned()))?;
        let last = members
            .len()
            .checked_sub(1)
            .ok_or_else(|| ConfigError::EmptyPath(path.to_owned()))?;
        if min_index > max_index {
            return Err(ConfigError::EmptyRange {
                parameter: "endpoint index",
                min: min_index,
                max: max_index,
            });
        }
        let index = self.rng.random_range(min_index..=max_index).min(last);
        Ok(members[index])
    }
}

impl Rule for GridPathfinder {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn settings(&self) -> RuleSettings {
        self.config.settings
    }

    fn initialize(&mut self, ctx: &mut GenContext<'_>) {
        self.rng = ctx.rng();
    }

    fn generate(&mut self, ctx: &mut GenContext<'_>) -> Result<(), GenError> {
        let start_path = self.config.start_path.clone();
        let end_path = self.config.end_path.clone();
        let start = self.pick_endpoint(
            ctx,
            &start_path,
            self.config.start_min_index,
            self.config.start_max_index,
        )?;
        let end = self.pick_endpoint(
            ctx,
            &end_path,
            self.config.end_min_index,
            self.config.end_max_index,
        )?;

        let bounds = ctx
            .dungeon()
            .bounds()
            .unwrap_or_else(|| GridAab::single_cube(start))
            .union_cube(start)
            .expand(self.config.padding);
        let lattice = Lattice::new(ctx, self.config.mode.restrict(bounds, start), start, end);
        if !lattice.contains(end) {
            return Err(GenError::LatticeExclusion {
                coord: end,
                mode: self.config.mode,
            });
        }

        let route = lattice
            .shortest_route(start, end)
            .ok_or(GenError::NoRouteFound { from: start })?;
        log::debug!(
            "[{name}] route of {len} chunks from {start:?} to {end:?}",
            name = self.config.name,
            len = route.len()
        );

        let dungeon = ctx.dungeon_mut();
        for pair in route.windows(2) {
            dungeon.add_edge(pair[0], pair[1]);
        }
        for &coord in &route {
            dungeon.get_or_create_chunk_at(coord);
            dungeon.add_category(coord, &self.config.category);
        }
        Ok(())
    }
}

/// Cells a route may pass through, joined to their axis neighbors.
struct Lattice {
    graph: UnGraph<GridPoint, ()>,
    nodes: HashMap<GridPoint, NodeIndex>,
}

impl Lattice {
    /// Every cell of `bounds` that holds no chunk, plus the two endpoints if they are
    /// within `bounds`.
    fn new(ctx: &GenContext<'_>, bounds: GridAab, start: GridPoint, end: GridPoint) -> Self {
        let mut graph = UnGraph::default();
        let mut nodes = HashMap::new();
        for cube in bounds.interior_iter() {
            if cube == start || cube == end || ctx.dungeon().chunk(cube).is_none() {
                nodes.insert(cube, graph.add_node(cube));
            } else {
                log::trace!(target: LATTICE_TARGET, "{cube:?} is occupied");
            }
        }
        // Edges are added in node order, not map order, so that ties between equally short
        // routes are broken the same way on every run.
        for index in graph.node_indices().collect::<Vec<_>>() {
            let cube = graph[index];
            for face in [Face6::PX, Face6::PY, Face6::PZ] {
                if let Some(&neighbor) = nodes.get(&(cube + face.normal_vector())) {
                    graph.add_edge(index, neighbor, ());
                }
            }
        }
        Self { graph, nodes }
    }

    fn contains(&self, cube: GridPoint) -> bool {
        self.nodes.contains_key(&cube)
    }

    /// Returns the cells of a shortest route, both endpoints included.
    fn shortest_route(&self, start: GridPoint, end: GridPoint) -> Option<Vec<GridPoint>> {
        let &from = self.nodes.get(&start)?;
        let &to = self.nodes.get(&end)?;
        let (_cost, route) = petgraph::algo::astar(
            &self.graph,
            from,
            |node| node == to,
            |_| 1u32,
            |node| manhattan_length(end - self.graph[node]).unsigned_abs(),
        )?;
        Some(route.into_iter().map(|node| self.graph[node]).collect())
    }
}
