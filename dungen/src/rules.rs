//! The rules available to a [`Pipeline`](crate::Pipeline).

mod grid_path;
pub use grid_path::*;
mod path_walk;
pub use path_walk::*;
mod resize;
pub use resize::*;
