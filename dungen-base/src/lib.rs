//! This library is an internal component of [`dungen`],
//! which defines the grid and coordinate types that dungeon generation is built on.
//! Do not depend on this library; use only [`dungen`] instead.
//!
//! [`dungen`]: https://crates.io/crates/dungen/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(not(test), warn(clippy::std_instead_of_core))]

#[cfg(test)]
#[macro_use]
extern crate std;

/// Do not use this module directly; its contents are re-exported from `dungen`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `dungen`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
