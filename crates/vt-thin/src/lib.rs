//! Topology-preserving thinning of binary voxel grids.
//!
//! Implements the directional thinning of Lee, Kashyap and Chu (1994),
//! "Building skeleton models via 3-D medial surface/axis thinning
//! algorithms" [Lee94]. Foreground voxels are peeled from the six border
//! directions in turn until a full cycle deletes nothing.
//!
//! A border voxel is deleted only when it
//! - has more than one foreground neighbor (arc ends are kept),
//! - leaves the local Euler characteristic unchanged ([`euler`]),
//! - is simple: its 26 neighbors stay one connected piece ([`simple`]).
//!
//! Candidates of one direction are gathered first and then removed one by
//! one, re-testing simplicity against the grid as already modified in that
//! pass. This sequential re-check is what keeps parallel candidates from
//! jointly disconnecting the shape, and it is why a pass cannot be split
//! across threads.
//!
//! Depth-1 grids are thinned as 2D images. [`ThinningEngine::thin_planes`]
//! thins each plane of a volume independently.

mod engine;
pub mod euler;
mod planes;
pub mod simple;

pub use engine::{
    BorderDirection, PassOutcome, ThinningConfig, ThinningEngine, ThinningReport, ThinningState,
    is_border_point, is_deletable, skeletonize, thin,
};
pub use euler::is_euler_invariant;
pub use planes::thin_planes;
pub use simple::is_simple_point;
