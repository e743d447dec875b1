//! [`Chunk`], a single room cell of a dungeon.

use std::collections::BTreeSet;

use crate::connector::ConnectorKey;
use crate::math::{FreePoint, FreeVector, GridPoint, grid_to_free};

/// A room placed at a unique grid coordinate.
///
/// Chunks are created and modified only through their [`Dungeon`](crate::Dungeon), which
/// keeps each chunk's position, categories and connectors consistent with the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    coord: GridPoint,
    size: FreeVector,
    position: FreePoint,
    categories: BTreeSet<String>,
    connectors: Vec<ConnectorKey>,
}

impl Chunk {
    pub(crate) fn new(coord: GridPoint, size: FreeVector, offset: FreeVector) -> Self {
        Self {
            coord,
            size,
            position: layout_position(coord, size, offset),
            categories: BTreeSet::new(),
            connectors: Vec::new(),
        }
    }

    /// The grid coordinate which identifies this chunk.
    pub fn coord(&self) -> GridPoint {
        self.coord
    }

    /// The extent of the room along each axis.
    pub fn size(&self) -> FreeVector {
        self.size
    }

    /// The center of the room in free space.
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Category tags attached to this chunk, in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Returns whether this chunk has been tagged with `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Keys of the connectors attached to this chunk, one per incident edge that has one,
    /// in the order the edges were added.
    pub fn connectors(&self) -> &[ConnectorKey] {
        &self.connectors
    }

    /// Returns whether the tag was newly added.
    pub(crate) fn insert_category(&mut self, category: &str) -> bool {
        if self.categories.contains(category) {
            false
        } else {
            self.categories.insert(category.to_owned());
            true
        }
    }

    pub(crate) fn push_connector(&mut self, key: ConnectorKey) {
        if !self.connectors.contains(&key) {
            self.connectors.push(key);
        }
    }

    /// Changes the size and recomputes the position for that size.
    pub(crate) fn resize(&mut self, size: FreeVector, offset: FreeVector) {
        self.size = size;
        self.position = layout_position(self.coord, size, offset);
    }

    /// Recomputes the position as if the chunk had size `layout_size`, keeping its own size.
    pub(crate) fn lay_out(&mut self, layout_size: FreeVector, offset: FreeVector) {
        self.position = layout_position(self.coord, layout_size, offset);
    }
}

/// Position of the chunk at `coord` when every chunk along the way has `size`:
/// `coord * size + coord * offset`, componentwise.
pub(crate) fn layout_position(coord: GridPoint, size: FreeVector, offset: FreeVector) -> FreePoint {
    grid_to_free(coord).component_mul(size + offset).to_point()
}
