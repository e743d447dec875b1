//! [`Dungeon`]: the chunk registry, graph and connectors shared by all rules of a run.

use hashbrown::HashMap;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::Chunk;
use crate::connector::{Connector, ConnectorKey};
use crate::graph::Graph;
use crate::listen::{Listener, Notifier};
use crate::math::{Face6, FreeVector, GridAab, GridPoint, adjacent_cube};

/// Parameters of a [`Dungeon`] which apply to every chunk and connector.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct DungeonConfig {
    /// Size of newly created chunks. Every component must be positive.
    pub chunk_size: FreeVector,
    /// Extra space between neighboring chunks, per grid step.
    pub chunk_offset: FreeVector,
    /// Lower bound of the random connector width on each axis.
    pub connector_min_width: FreeVector,
    /// Upper bound of the random connector width on each axis.
    pub connector_max_width: FreeVector,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            chunk_size: FreeVector::new(5.0, 1.0, 5.0),
            chunk_offset: FreeVector::new(1.5, 0.0, 1.5),
            connector_min_width: FreeVector::new(3.0, 1.0, 3.0),
            connector_max_width: FreeVector::new(3.0, 1.0, 3.0),
        }
    }
}

/// Message sent when a chunk gains a category it did not have before.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct CategoryChanged {
    /// The chunk which changed.
    pub coord: GridPoint,
    /// The category which was added.
    pub category: String,
}

/// The chunks of a dungeon, the graph connecting them, and the connectors along its edges.
///
/// All mutation goes through `&mut Dungeon`, which keeps the graph, the chunk arena and the
/// connectors consistent:
///
/// * there is at most one chunk per coordinate, and every chunk is a graph node;
/// * every edge between axis-adjacent chunks has exactly one [`Connector`], listed by
///   both chunks;
/// * categories are only ever added, until the dungeon is [cleared](Self::clear).
#[derive(Debug)]
pub struct Dungeon {
    config: DungeonConfig,
    graph: Graph<GridPoint>,
    chunks: HashMap<GridPoint, Chunk>,
    connectors: HashMap<ConnectorKey, Connector>,
    /// Connector keys in creation order.
    connector_order: Vec<ConnectorKey>,
    /// Category changes not yet delivered to rules.
    pending_changes: Vec<CategoryChanged>,
    notifier: Notifier<CategoryChanged>,
    /// Source of connector widths.
    rng: Xoshiro256Plus,
}

impl Dungeon {
    /// Constructs an empty dungeon.
    pub fn new(config: DungeonConfig) -> Self {
        Self {
            config,
            graph: Graph::new(),
            chunks: HashMap::new(),
            connectors: HashMap::new(),
            connector_order: Vec::new(),
            pending_changes: Vec::new(),
            notifier: Notifier::new(),
            rng: Xoshiro256Plus::seed_from_u64(0),
        }
    }

    /// Removes every chunk, edge and connector, and reseeds the connector width generator.
    ///
    /// Listeners registered with [`Self::listen()`] are kept.
    pub fn clear(&mut self, seed: u64) {
        self.graph.clear();
        self.chunks.clear();
        self.connectors.clear();
        self.connector_order.clear();
        self.pending_changes.clear();
        self.rng = Xoshiro256Plus::seed_from_u64(seed);
    }

    /// The parameters this dungeon was created with.
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// The graph whose nodes are the coordinates of every chunk.
    pub fn graph(&self) -> &Graph<GridPoint> {
        &self.graph
    }

    /// Returns the chunk at `coord`, if there is one.
    pub fn chunk(&self, coord: GridPoint) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// All chunks, in the order they were created.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.graph
            .nodes()
            .iter()
            .filter_map(move |coord| self.chunks.get(coord))
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the chunk at `coord`, creating it first if there is none.
    ///
    /// A new chunk has the configured default size, is positioned for that size, and is
    /// added to the graph with no neighbors.
    pub fn get_or_create_chunk_at(&mut self, coord: GridPoint) -> &Chunk {
        if !self.chunks.contains_key(&coord) {
            let added = self.graph.add_node(coord);
            debug_assert!(added.is_ok(), "graph already had {coord:?}");
            self.chunks.insert(
                coord,
                Chunk::new(coord, self.config.chunk_size, self.config.chunk_offset),
            );
        }
        &self.chunks[&coord]
    }

    /// Tags the chunk at `coord` with `category`.
    ///
    /// If the chunk did not already have it, listeners are notified and the change is
    /// queued for delivery to rules. Returns whether the tag was newly added; returns
    /// `false` if there is no chunk at `coord`.
    pub fn add_category(&mut self, coord: GridPoint, category: &str) -> bool {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };
        if !chunk.insert_category(category) {
            return false;
        }
        let change = CategoryChanged {
            coord,
            category: category.to_owned(),
        };
        self.notifier.notify(&change);
        self.pending_changes.push(change);
        true
    }

    /// Connects the chunks at `a` and `b` with an undirected edge, creating the chunks if
    /// needed, and gives the new edge a [`Connector`].
    ///
    /// Returns whether the edge is new.
    pub fn add_edge(&mut self, a: GridPoint, b: GridPoint) -> bool {
        self.get_or_create_chunk_at(a);
        self.get_or_create_chunk_at(b);
        if !self.graph.add_edge(a, b, false) {
            return false;
        }

        let key = ConnectorKey::new(a, b);
        if self.connectors.contains_key(&key) {
            return true;
        }
        let width = self.random_connector_width();
        match Connector::new(&self.chunks[&a], &self.chunks[&b], width) {
            Some(connector) => {
                self.connectors.insert(key, connector);
                self.connector_order.push(key);
                for end in [a, b] {
                    if let Some(chunk) = self.chunks.get_mut(&end) {
                        chunk.push_connector(key);
                    }
                }
            }
            None => {
                log::warn!("no connector between {a:?} and {b:?}: chunks are not adjacent");
            }
        }
        true
    }

    fn random_connector_width(&mut self) -> FreeVector {
        let min = self.config.connector_min_width;
        let max = self.config.connector_max_width;
        let mut draw = |low: f64, high: f64| {
            if low < high {
                self.rng.random_range(low..=high)
            } else {
                low
            }
        };
        FreeVector::new(draw(min.x, max.x), draw(min.y, max.y), draw(min.z, max.z))
    }

    /// Gives the chunk at `coord` a new size and moves it to the position for that size.
    ///
    /// Its connectors are updated to match.
    pub fn resize_chunk(&mut self, coord: GridPoint, size: FreeVector) {
        let offset = self.config.chunk_offset;
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.resize(size, offset);
            self.sync_connectors(coord);
        }
    }

    /// Moves the chunk at `coord` to the position it would have if it were `layout_size`,
    /// without changing its size.
    ///
    /// Its connectors are updated to match.
    pub fn lay_out_chunk(&mut self, coord: GridPoint, layout_size: FreeVector) {
        let offset = self.config.chunk_offset;
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.lay_out(layout_size, offset);
            self.sync_connectors(coord);
        }
    }

    fn sync_connectors(&mut self, coord: GridPoint) {
        let Some(chunk) = self.chunks.get(&coord) else {
            return;
        };
        for key in chunk.connectors() {
            if let (Some(connector), Some(low), Some(high)) = (
                self.connectors.get_mut(key),
                self.chunks.get(&key.low()),
                self.chunks.get(&key.high()),
            ) {
                connector.sync(low, high);
            }
        }
    }

    /// All connectors, in the order they were created.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.connector_order
            .iter()
            .filter_map(move |key| self.connectors.get(key))
    }

    /// Returns the connector between `a` and `b` (in either order), if there is one.
    pub fn connector(&self, a: GridPoint, b: GridPoint) -> Option<&Connector> {
        self.connectors.get(&ConnectorKey::new(a, b))
    }

    /// Returns the coordinates of chunks that have any of the given categories, in creation
    /// order.
    ///
    /// An empty filter, or one containing a blank entry, matches every chunk.
    pub fn chunks_with_categories<S: AsRef<str>>(&self, categories: &[S]) -> Vec<GridPoint> {
        let match_all =
            categories.is_empty() || categories.iter().any(|c| c.as_ref().trim().is_empty());
        self.chunks()
            .filter(|chunk| {
                match_all || categories.iter().any(|c| chunk.has_category(c.as_ref()))
            })
            .map(Chunk::coord)
            .collect()
    }

    /// Returns the coordinates of existing chunks at the six axis neighbors of `coord`.
    pub fn adjacent_chunks(&self, coord: GridPoint) -> impl Iterator<Item = GridPoint> + '_ {
        Face6::ALL
            .into_iter()
            .filter_map(move |face| adjacent_cube(coord, face))
            .filter(move |neighbor| self.chunks.contains_key(neighbor))
    }

    /// The smallest box containing every chunk coordinate, or [`None`] if there are no chunks.
    pub fn bounds(&self) -> Option<GridAab> {
        GridAab::enclosing(self.graph.nodes().iter().copied())
    }

    /// Registers a listener for category changes.
    ///
    /// Unlike rules, which see changes only once the current rule has finished, listeners
    /// receive each change as it happens.
    pub fn listen(&self, listener: impl Listener<CategoryChanged> + 'static) {
        self.notifier.listen(listener);
    }

    /// Removes and returns the category changes which have not yet been delivered to rules.
    pub(crate) fn take_pending_changes(&mut self) -> Vec<CategoryChanged> {
        std::mem::take(&mut self.pending_changes)
    }
}

impl Default for Dungeon {
    fn default() -> Self {
        Self::new(DungeonConfig::default())
    }
}
