//! Logging helpers shared by programs embedding dungen.

/// Target used for per-cell messages emitted while building a pathfinding lattice.
///
/// These are produced once per lattice cell and therefore are excluded by
/// [`standard_filter()`].
pub const LATTICE_TARGET: &str = "dungen::lattice";

/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of dungen.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced for every grid cell unless something is wrong.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    !(metadata.target().starts_with(LATTICE_TARGET) && metadata.level() > log::Level::Warn)
}
