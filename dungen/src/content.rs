//! Walking a finished [`Dungeon`] to place scene content.
//!
//! This crate does not create any geometry itself; a host that does can use
//! [`placements()`] to learn where each chunk and connector should go.

use hashbrown::HashSet;

use crate::Dungeon;
use crate::connector::ConnectorKey;
use crate::math::{FreePoint, FreeVector, GridPoint};

/// What a [`Placement`] is for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[expect(clippy::exhaustive_enums)]
pub enum PlacementKind {
    /// The chunk at this coordinate.
    Chunk(GridPoint),
    /// The connector between this pair of chunks.
    Connector(ConnectorKey),
}

/// A box to be filled with content.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[expect(clippy::exhaustive_structs)]
pub struct Placement {
    #[allow(missing_docs)]
    pub kind: PlacementKind,
    /// Center of the box.
    pub center: FreePoint,
    /// Extent of the box along each axis.
    pub size: FreeVector,
}

/// Lists every chunk of `dungeon` in creation order, each followed (if
/// `include_connectors` is true) by those of its connectors not already listed.
///
/// Every chunk and connector appears exactly once.
pub fn placements(dungeon: &Dungeon, include_connectors: bool) -> Vec<Placement> {
    let mut output = Vec::with_capacity(dungeon.chunk_count());
    let mut placed_connectors: HashSet<ConnectorKey> = HashSet::new();
    for chunk in dungeon.chunks() {
        output.push(Placement {
            kind: PlacementKind::Chunk(chunk.coord()),
            center: chunk.position(),
            size: chunk.size(),
        });
        if !include_connectors {
            continue;
        }
        for &key in chunk.connectors() {
            let Some(connector) = dungeon.connector(key.low(), key.high()) else {
                continue;
            };
            if placed_connectors.insert(key) {
                output.push(Placement {
                    kind: PlacementKind::Connector(key),
                    center: connector.center(),
                    size: connector.size(),
                });
            }
        }
    }
    output
}
