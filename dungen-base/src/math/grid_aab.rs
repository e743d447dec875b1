//! Axis-aligned integer-coordinate box volumes ([`GridAab`]).

use core::fmt;
use core::ops::Range;

use crate::math::{Axis, GridCoordinate, GridIter, GridPoint};

/// An axis-aligned box with integer coordinates, whose volume is a set of whole grid cells.
///
/// Lower bounds are inclusive and upper bounds are exclusive, so a box whose lower and
/// upper bounds are equal on some axis is empty.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridAab {
    lower_bounds: GridPoint,
    /// Constructor checks ensure this is not smaller than `lower_bounds`.
    upper_bounds: GridPoint,
}

impl GridAab {
    /// Box that covers every cell which can be the interior of some box.
    ///
    /// Cells with any coordinate equal to [`GridCoordinate::MAX`] are outside it, since no
    /// box can have an upper bound beyond them.
    pub const EVERYWHERE: GridAab = GridAab {
        lower_bounds: GridPoint::new(
            GridCoordinate::MIN,
            GridCoordinate::MIN,
            GridCoordinate::MIN,
        ),
        upper_bounds: GridPoint::new(
            GridCoordinate::MAX,
            GridCoordinate::MAX,
            GridCoordinate::MAX,
        ),
    };

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// For example, if on one axis the lower bound is 5 and the upper bound is 10,
    /// then the cells within the box are numbered 5 through 9 (inclusive).
    ///
    /// Returns [`Err`] if any of the `upper_bounds` are less than the `lower_bounds`.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if Axis::ALL
            .into_iter()
            .any(|axis| upper_bounds[axis] < lower_bounds[axis])
        {
            return Err(GridOverflowError {
                lower_bounds,
                upper_bounds,
            });
        }
        Ok(GridAab {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Panics if any of the `upper_bounds` are less than the `lower_bounds`.
    /// Use [`GridAab::checked_from_lower_upper`] to avoid panics.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> GridAab {
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Ok(aab) => aab,
            Err(error) => panic!("GridAab::from_lower_upper: {error}"),
        }
    }

    /// Constructs a [`GridAab`] with a volume of 1, containing the specified cell.
    ///
    /// Panics if `cube` is not within [`GridAab::EVERYWHERE`], i.e. has any coordinate
    /// equal to [`GridCoordinate::MAX`].
    #[inline]
    #[track_caller]
    pub fn single_cube(cube: GridPoint) -> GridAab {
        GridAab::from_lower_upper(cube, cube + GridPoint::new(1, 1, 1).to_vector())
    }

    /// Returns whether the box contains no cells (its volume is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        Axis::ALL
            .into_iter()
            .any(|axis| self.upper_bounds[axis] == self.lower_bounds[axis])
    }

    /// Inclusive lower bounds on cell coordinates.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cell coordinates.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// The range of X coordinates for cells within the box.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::X)
    }

    /// The range of Y coordinates for cells within the box.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Y)
    }

    /// The range of Z coordinates for cells within the box.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Z)
    }

    /// The range of coordinates for cells within the box along the given axis.
    #[inline]
    pub fn axis_range(&self, axis: Axis) -> Range<GridCoordinate> {
        self.lower_bounds[axis]..self.upper_bounds[axis]
    }

    /// Iterate over all cell positions within this box.
    ///
    /// ```
    /// use dungen_base::math::{GridAab, GridPoint};
    ///
    /// let b = GridAab::from_lower_upper([10, 20, 30], [11, 22, 33]);
    /// assert_eq!(b.interior_iter().count(), 6);
    /// assert_eq!(b.interior_iter().next(), Some(GridPoint::new(10, 20, 30)));
    /// ```
    #[inline]
    pub fn interior_iter(self) -> GridIter {
        GridIter::new(self)
    }

    /// Returns whether the box includes the given cell position in its volume.
    ///
    /// ```
    /// use dungen_base::math::{GridAab, GridPoint};
    ///
    /// let b = GridAab::from_lower_upper([4, 4, 4], [10, 10, 10]);
    /// assert!(!b.contains_cube(GridPoint::new(3, 5, 5)));
    /// assert!(b.contains_cube(GridPoint::new(4, 5, 5)));
    /// assert!(b.contains_cube(GridPoint::new(9, 5, 5)));
    /// assert!(!b.contains_cube(GridPoint::new(10, 5, 5)));
    /// ```
    #[inline]
    pub fn contains_cube(&self, cube: GridPoint) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            cube[axis] >= self.lower_bounds[axis] && cube[axis] < self.upper_bounds[axis]
        })
    }

    /// Extend the bounds of `self` as needed to enclose the cell `other`.
    ///
    /// Note that this does not discard the bounds of an empty `self`.
    /// Panics if `other` is not within [`GridAab::EVERYWHERE`].
    ///
    /// ```
    /// use dungen_base::math::{GridAab, GridPoint};
    ///
    /// let accumulation =
    ///     GridAab::single_cube(GridPoint::new(1, 10, 7))
    ///         .union_cube(GridPoint::new(2, 5, 10));
    /// assert_eq!(accumulation, GridAab::from_lower_upper([1, 5, 7], [3, 11, 11]));
    /// ```
    #[inline]
    #[must_use]
    pub fn union_cube(self, other: GridPoint) -> GridAab {
        Self {
            lower_bounds: self.lower_bounds.min(other),
            upper_bounds: self.upper_bounds.max(other + GridPoint::new(1, 1, 1).to_vector()),
        }
    }

    /// Moves all bounds outward by `margin` cells, saturating at the numeric limits.
    ///
    /// ```
    /// use dungen_base::math::GridAab;
    ///
    /// assert_eq!(
    ///     GridAab::from_lower_upper([0, 0, 0], [1, 2, 3]).expand(2),
    ///     GridAab::from_lower_upper([-2, -2, -2], [3, 4, 5]),
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn expand(self, margin: u32) -> Self {
        let lower = self.lower_bounds;
        let upper = self.upper_bounds;
        Self {
            lower_bounds: GridPoint::new(
                lower.x.saturating_sub_unsigned(margin),
                lower.y.saturating_sub_unsigned(margin),
                lower.z.saturating_sub_unsigned(margin),
            ),
            upper_bounds: GridPoint::new(
                upper.x.saturating_add_unsigned(margin),
                upper.y.saturating_add_unsigned(margin),
                upper.z.saturating_add_unsigned(margin),
            ),
        }
    }

    /// Returns the smallest box containing every given cell, or [`None`] if there are none.
    ///
    /// Panics if any cell is not within [`GridAab::EVERYWHERE`].
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn enclosing(cubes: impl IntoIterator<Item = GridPoint>) -> Option<GridAab> {
        let mut cubes = cubes.into_iter();
        let first = GridAab::single_cube(cubes.next()?);
        Some(cubes.fold(first, GridAab::union_cube))
    }
}

impl fmt::Debug for GridAab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridAab")
            .field(&self.x_range())
            .field(&self.y_range())
            .field(&self.z_range())
            .finish()
    }
}

/// Error when a [`GridAab`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("GridAab's lower bounds {lower_bounds:?} were greater than upper bounds {upper_bounds:?}")]
pub struct GridOverflowError {
    lower_bounds: GridPoint,
    upper_bounds: GridPoint,
}

impl core::error::Error for GridOverflowError {}
