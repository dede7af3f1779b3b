//! Umbrella crate for the `voxel-thin` workspace.
//!
//! Re-exports the grid primitives, the thinning engine and the topology
//! counters so applications only depend on one crate.
//!
//! ```
//! use voxel_thin::{VoxelGrid, skeletonize, summarize};
//!
//! let mut grid = VoxelGrid::new_2d(7, 7).unwrap();
//! for y in 1..6 {
//!     for x in 1..6 {
//!         grid.set(x, y, 0, true);
//!     }
//! }
//!
//! let skeleton = skeletonize(&grid);
//! assert_eq!(skeleton.count_foreground(), 1);
//! assert!(summarize(&grid).same_topology(&summarize(&skeleton)));
//! ```

pub use vt_core::*;
pub use vt_thin::*;
pub use vt_topology::{
    Connectivity, Labeling, TopologySummary, count_cavities, count_components,
    label_components, summarize,
};
