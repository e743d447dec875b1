//! Mathematical utilities and decisions.

mod axis;
pub use axis::*;
mod coord;
pub use coord::*;
mod face;
pub use face::*;
mod grid_aab;
pub use grid_aab::*;
mod grid_iter;
pub use grid_iter::*;

// We make an assumption in several places that `usize` is at least 32 bits.
// It's likely that compilation would not succeed anyway, but let's make it explicit.
#[cfg(target_pointer_width = "16")]
compile_error!("dungen does not support platforms with less than 32-bit `usize`");

/// Returns the sum of the absolute values of the components of `vector`;
/// the number of unit steps along the grid axes needed to travel that far.
#[inline]
pub fn manhattan_length(vector: GridVector) -> GridCoordinate {
    vector.x.abs() + vector.y.abs() + vector.z.abs()
}

/// Returns the cell next to `cube` across `face`, or [`None`] if that cell is outside
/// [`GridAab::EVERYWHERE`].
#[inline]
pub fn adjacent_cube(cube: GridPoint, face: Face6) -> Option<GridPoint> {
    checked_add_point_vector(cube, face.normal_vector())
        .filter(|&next| GridAab::EVERYWHERE.contains_cube(next))
}
