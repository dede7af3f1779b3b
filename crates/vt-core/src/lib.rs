//! Foundational primitives for binary voxel thinning.
//!
//! ## Grids
//! [`VoxelGrid`] stores one boolean per voxel in x-fastest order. A 2D image
//! is a grid of depth 1. Reads outside the extents return background and
//! writes outside the extents are dropped, so neighborhood code never needs
//! bounds checks.
//!
//! ## Neighborhoods
//! [`Neighborhood`] is an immutable 27-slot copy of the 3x3x3 cube around a
//! voxel. Slots are ordered z-major, then y, then x, with the center at
//! [`CENTER`]. Lookup tables elsewhere depend on this order.

mod error;
mod grid;
mod neighborhood;

pub use error::{Error, Result};
pub use grid::{Voxel, VoxelGrid};
pub use neighborhood::{CENTER, Neighborhood, OFFSETS};
