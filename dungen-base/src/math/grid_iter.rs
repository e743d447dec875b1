use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{GridAab, GridCoordinate, GridPoint};

/// Iterator produced by [`GridAab::interior_iter()`].
///
/// Produces positions in X-major, then Y, then Z order.
#[derive(Clone, Debug)]
pub struct GridIter {
    x_range: Range<GridCoordinate>,
    y_range: Range<GridCoordinate>,
    z_range: Range<GridCoordinate>,
    cube: GridPoint,
}

impl GridIter {
    #[inline]
    pub(in crate::math) fn new(bounds: GridAab) -> Self {
        Self {
            x_range: bounds.x_range(),
            y_range: bounds.y_range(),
            z_range: bounds.z_range(),
            cube: if bounds.is_empty() {
                // next() produces self.cube whenever its x is in range, which is only
                // correct for nonempty bounds.
                bounds.upper_bounds()
            } else {
                bounds.lower_bounds()
            },
        }
    }
}

impl Iterator for GridIter {
    type Item = GridPoint;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cube.x >= self.x_range.end {
            return None;
        }
        let result = self.cube;

        let next_z = self.cube.z + 1;
        if next_z < self.z_range.end {
            self.cube.z = next_z;
        } else {
            self.cube.z = self.z_range.start;
            let next_y = self.cube.y + 1;
            if next_y < self.y_range.end {
                self.cube.y = next_y;
            } else {
                self.cube.y = self.y_range.start;
                // When x becomes out of bounds, that signals the end.
                self.cube.x += 1;
            }
        }

        Some(result)
    }

    #[allow(clippy::missing_inline_in_public_items, reason = "unclear benefit")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from((self.x_range.end - self.cube.x) - 1) {
            Err(_) => {
                // x has hit the end, no items left
                (0, Some(0))
            }
            Ok(planes_remaining) => {
                let rows_remaining = planes_remaining * self.y_range.len()
                    + usize::try_from((self.y_range.end - self.cube.y) - 1).unwrap_or(0);
                let cubes_remaining = rows_remaining * self.z_range.len()
                    + usize::try_from(self.z_range.end - self.cube.z).unwrap_or(0);

                (cubes_remaining, Some(cubes_remaining))
            }
        }
    }
}

impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn order_is_x_major() {
        let b = GridAab::from_lower_upper([0, 0, 0], [2, 1, 2]);
        assert_eq!(
            b.interior_iter().collect::<Vec<_>>(),
            [
                GridPoint::new(0, 0, 0),
                GridPoint::new(0, 0, 1),
                GridPoint::new(1, 0, 0),
                GridPoint::new(1, 0, 1),
            ]
        );
    }

    #[test]
    fn empty_produces_nothing() {
        let b = GridAab::from_lower_upper([0, 0, 0], [3, 0, 3]);
        let mut iter = b.interior_iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn size_hint_tracks_progress() {
        let b = GridAab::from_lower_upper([-1, -1, -1], [2, 2, 2]);
        let mut iter = b.interior_iter();
        assert_eq!(iter.len(), 27);
        for remaining in (0..27).rev() {
            assert!(iter.next().is_some());
            assert_eq!(iter.len(), remaining);
        }
        assert_eq!(iter.next(), None);
    }
}
