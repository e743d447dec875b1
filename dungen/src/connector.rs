//! [`Connector`], the joint between two connected chunks.

use std::cmp::Ordering;

use crate::Chunk;
use crate::math::{Face6, FreePoint, FreeVector, GridPoint};

/// Identifies a [`Connector`] by the unordered pair of chunk coordinates it joins.
///
/// The pair is stored with `low` preceding `high` in lexicographic (X, then Y, then Z)
/// order, so the same pair always produces the same key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct ConnectorKey {
    low: GridPoint,
    high: GridPoint,
}

impl ConnectorKey {
    /// Returns the key for the edge between `a` and `b`, in either order.
    pub fn new(a: GridPoint, b: GridPoint) -> Self {
        if lexicographic(a, b) == Ordering::Greater {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    /// The endpoint which comes first.
    pub fn low(self) -> GridPoint {
        self.low
    }

    /// The endpoint which comes second.
    pub fn high(self) -> GridPoint {
        self.high
    }
}

fn lexicographic(a: GridPoint, b: GridPoint) -> Ordering {
    (a.x, a.y, a.z).cmp(&(b.x, b.y, b.z))
}

/// The physical passage between two axis-adjacent chunks joined by an edge.
///
/// Along the connection axis the connector spans the gap between the facing surfaces of
/// the two chunks; across it, the connector has a width chosen once at random, no larger
/// than the smaller of the two chunks.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    key: ConnectorKey,
    direction: Face6,
    /// Randomly chosen cross-section, before capping to the chunk sizes.
    width: FreeVector,
    size: FreeVector,
    center: FreePoint,
}

impl Connector {
    /// Returns [`None`] if the chunks are not axis-adjacent.
    pub(crate) fn new(a: &Chunk, b: &Chunk, width: FreeVector) -> Option<Self> {
        let key = ConnectorKey::new(a.coord(), b.coord());
        // Positive by construction, since `low` precedes `high`.
        let direction = Face6::try_from(key.high - key.low).ok()?;
        let mut connector = Self {
            key,
            direction,
            width,
            size: FreeVector::zero(),
            center: FreePoint::origin(),
        };
        if a.coord() == key.low {
            connector.sync(a, b);
        } else {
            connector.sync(b, a);
        }
        Some(connector)
    }

    /// Recomputes the size and center from the current state of the two chunks,
    /// which must be given in `low`, `high` order.
    pub(crate) fn sync(&mut self, low: &Chunk, high: &Chunk) {
        debug_assert_eq!(
            ConnectorKey::new(low.coord(), high.coord()),
            self.key,
            "synced with the wrong chunks"
        );
        let axis = self.direction.axis();
        let low_size = low.size();
        let high_size = high.size();

        let distance = (high.position()[axis] - low.position()[axis]).abs();
        let gap = (distance - (low_size[axis] + high_size[axis]) / 2.0).max(0.0);

        let mut size = self.width.min(low_size.min(high_size)).max(FreeVector::zero());
        size[axis] = gap;

        let mut center = low.position().lerp(high.position(), 0.5);
        center[axis] = low.position()[axis] + low_size[axis] / 2.0 + gap / 2.0;

        self.size = size;
        self.center = center;
    }

    /// The pair of chunks this connector joins.
    pub fn key(&self) -> ConnectorKey {
        self.key
    }

    /// The chunk at the lower end of the connection axis.
    pub fn from(&self) -> GridPoint {
        self.key.low
    }

    /// The chunk at the upper end of the connection axis.
    pub fn to(&self) -> GridPoint {
        self.key.high
    }

    /// The direction from [`Self::from()`] to [`Self::to()`]; always a positive face.
    pub fn direction(&self) -> Face6 {
        self.direction
    }

    /// Extent of the passage along each axis.
    pub fn size(&self) -> FreeVector {
        self.size
    }

    /// Center of the passage, halfway across the gap between the two chunks.
    pub fn center(&self) -> FreePoint {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OFFSET: FreeVector = FreeVector::new(1.5, 0.0, 1.5);

    fn chunk(x: i32, y: i32, z: i32, size: FreeVector) -> Chunk {
        Chunk::new(GridPoint::new(x, y, z), size, OFFSET)
    }

    #[test]
    fn key_is_unordered() {
        let a = GridPoint::new(0, 0, 1);
        let b = GridPoint::new(0, 0, 0);
        assert_eq!(ConnectorKey::new(a, b), ConnectorKey::new(b, a));
        assert_eq!(ConnectorKey::new(a, b).low(), b);
        assert_eq!(ConnectorKey::new(a, b).high(), a);
    }

    #[test]
    fn spans_gap_between_equal_chunks() {
        let size = FreeVector::new(5.0, 1.0, 5.0);
        let a = chunk(0, 0, 1, size);
        let b = chunk(0, 0, 0, size);
        let connector = Connector::new(&a, &b, FreeVector::new(3.0, 1.0, 3.0)).unwrap();

        assert_eq!(connector.from(), b.coord());
        assert_eq!(connector.direction(), Face6::PZ);
        // Centers are 6.5 apart and each chunk extends 2.5 toward the other.
        assert_eq!(connector.size(), FreeVector::new(3.0, 1.0, 1.5));
        assert_eq!(connector.center(), FreePoint::new(0.0, 0.0, 3.25));
    }

    #[test]
    fn width_is_capped_by_smaller_chunk() {
        let a = chunk(0, 0, 0, FreeVector::new(4.0, 2.0, 4.0));
        let b = chunk(1, 0, 0, FreeVector::new(6.0, 3.0, 6.0));
        let connector = Connector::new(&a, &b, FreeVector::new(1.0, 10.0, 5.0)).unwrap();
        assert_eq!(connector.direction(), Face6::PX);
        assert_eq!(connector.size().y, 2.0);
        assert_eq!(connector.size().z, 4.0);
        // positions 0 and 7.5; surfaces at 2 and 4.5
        assert_eq!(connector.size().x, 2.5);
        assert_eq!(connector.center().x, 3.25);
    }

    #[test]
    fn not_adjacent() {
        let size = FreeVector::splat(1.0);
        assert_eq!(
            Connector::new(&chunk(0, 0, 0, size), &chunk(0, 2, 0, size), size),
            None
        );
        assert_eq!(
            Connector::new(&chunk(0, 0, 0, size), &chunk(1, 1, 0, size), size),
            None
        );
    }
}
