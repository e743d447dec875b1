//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Vector3D};

/// Unit-of-measure marker for the dungeon's room grid and the free space the rooms occupy.
///
/// This type is never constructed; it exists only to tag [`euclid`] types.
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cell {}

/// Coordinates that are locked to the room grid.
pub type GridCoordinate = i32;

/// Positions that are locked to the room grid.
pub type GridPoint = Point3D<GridCoordinate, Cell>;

/// Vectors that are locked to the room grid.
pub type GridVector = Vector3D<GridCoordinate, Cell>;

/// Coordinates that are not locked to the room grid.
///
/// Note: Because `GridCoordinate = i32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions that are not locked to the room grid, such as the center of a room.
pub type FreePoint = Point3D<FreeCoordinate, Cell>;

/// Vectors that are not locked to the room grid, such as the size of a room.
pub type FreeVector = Vector3D<FreeCoordinate, Cell>;

/// Converts a grid position to the free vector with the same components.
#[inline]
pub fn grid_to_free(cube: GridPoint) -> FreeVector {
    cube.to_vector().to_f64()
}

/// Adds `v` to `p`, or returns [`None`] if any component overflows.
#[inline]
pub fn checked_add_point_vector(p: GridPoint, v: GridVector) -> Option<GridPoint> {
    Some(GridPoint::new(
        p.x.checked_add(v.x)?,
        p.y.checked_add(v.y)?,
        p.z.checked_add(v.z)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_to_free_keeps_components() {
        assert_eq!(
            grid_to_free(GridPoint::new(-1, 2, 30)),
            FreeVector::new(-1.0, 2.0, 30.0)
        );
    }

    #[test]
    fn checked_add_overflow() {
        let p = GridPoint::new(GridCoordinate::MAX, 0, GridCoordinate::MIN);
        assert_eq!(
            checked_add_point_vector(p, GridVector::new(-1, 1, 0)),
            Some(GridPoint::new(GridCoordinate::MAX - 1, 1, GridCoordinate::MIN))
        );
        assert_eq!(checked_add_point_vector(p, GridVector::new(1, 0, 0)), None);
        assert_eq!(checked_add_point_vector(p, GridVector::new(0, 0, -1)), None);
    }
}
