use std::ops::ControlFlow;

use tracing::{debug, debug_span, info, trace};
use vt_core::{Neighborhood, Voxel, VoxelGrid};

use crate::euler::is_euler_invariant;
use crate::simple::is_simple_point;

/// The six border types visited in every cycle, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderDirection {
    North,
    South,
    East,
    West,
    Up,
    Bottom,
}

impl BorderDirection {
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Bottom,
    ];

    /// Offset `(dx, dy, dz)` of the neighbor that must be background.
    pub fn offset(self) -> [isize; 3] {
        match self {
            Self::North => [0, -1, 0],
            Self::South => [0, 1, 0],
            Self::East => [1, 0, 0],
            Self::West => [-1, 0, 0],
            Self::Up => [0, 0, 1],
            Self::Bottom => [0, 0, -1],
        }
    }

    /// Following direction within a cycle, `None` after `Bottom`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::North => Some(Self::South),
            Self::South => Some(Self::East),
            Self::East => Some(Self::West),
            Self::West => Some(Self::Up),
            Self::Up => Some(Self::Bottom),
            Self::Bottom => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinningConfig {
    /// Upper bound on full six-direction cycles. `None` runs to convergence.
    pub max_cycles: Option<usize>,
    /// Roll back a re-verified deletion when the voxel has no foreground
    /// neighbor left. Without it the last voxel of a small component can be
    /// removed after its neighbors went earlier in the same pass.
    pub guard_isolated: bool,
}

impl Default for ThinningConfig {
    fn default() -> Self {
        Self {
            max_cycles: None,
            guard_isolated: true,
        }
    }
}

/// Where a thinning run is, or ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinningState {
    /// The next pass to run. Cycles count from 1.
    Running {
        direction: BorderDirection,
        cycle: usize,
    },
    /// A whole cycle went by without a single deletion.
    Converged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub direction: BorderDirection,
    pub cycle: usize,
    pub candidates: usize,
    pub deleted: usize,
    pub rolled_back: usize,
}

/// Totals of a run. Handing a stopped report to [`ThinningEngine::resume`]
/// continues the run where it left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinningReport {
    pub cycles: usize,
    pub passes: usize,
    pub deleted: usize,
    pub rolled_back: usize,
    /// Passes of the current cycle that deleted nothing.
    pub quiet_passes: usize,
    pub state: ThinningState,
}

impl ThinningReport {
    fn start() -> Self {
        Self {
            cycles: 0,
            passes: 0,
            deleted: 0,
            rolled_back: 0,
            quiet_passes: 0,
            state: ThinningState::Running {
                direction: BorderDirection::North,
                cycle: 1,
            },
        }
    }

    pub fn converged(&self) -> bool {
        self.state == ThinningState::Converged
    }
}

/// `v` is foreground and its neighbor in `direction` is background.
pub fn is_border_point(grid: &VoxelGrid, v: Voxel, direction: BorderDirection) -> bool {
    let [dx, dy, dz] = direction.offset();
    let (x, y, z) = (v[0] as isize, v[1] as isize, v[2] as isize);
    grid.get(x, y, z) && !grid.get(x + dx, y + dy, z + dz)
}

/// Candidate test: not an arc end, Euler invariant and simple.
pub fn is_deletable(n: &Neighborhood) -> bool {
    n.count_neighbors() != 1 && is_euler_invariant(n) && is_simple_point(n)
}

/// Directional thinning driver [Lee94].
///
/// Each pass collects the deletable border points of one direction from a
/// read-only scan, then deletes them one at a time in scan order, re-testing
/// simplicity against the partially thinned grid and restoring any voxel
/// that no longer qualifies. The grid is only ever observed between passes.
#[derive(Debug, Default, Clone)]
pub struct ThinningEngine {
    candidates: Vec<Voxel>,
}

impl ThinningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thins `grid` in place until convergence or `cfg.max_cycles`.
    pub fn thin(&mut self, grid: &mut VoxelGrid, cfg: &ThinningConfig) -> ThinningReport {
        self.thin_with(grid, cfg, |_| ControlFlow::Continue(()))
    }

    /// Like [`ThinningEngine::thin`], calling `on_pass` after every direction
    /// pass. Returning `ControlFlow::Break` stops before the next pass; the
    /// report's state then names the pass that would have run.
    pub fn thin_with<F>(
        &mut self,
        grid: &mut VoxelGrid,
        cfg: &ThinningConfig,
        on_pass: F,
    ) -> ThinningReport
    where
        F: FnMut(&PassOutcome) -> ControlFlow<()>,
    {
        self.resume_with(grid, cfg, ThinningReport::start(), on_pass)
    }

    /// Continues a run stopped by `max_cycles` or a callback, starting at the
    /// pass named by `report.state`. Totals keep accumulating into the
    /// returned report. The grid must be the one the stopped run left behind.
    pub fn resume(
        &mut self,
        grid: &mut VoxelGrid,
        cfg: &ThinningConfig,
        report: ThinningReport,
    ) -> ThinningReport {
        self.resume_with(grid, cfg, report, |_| ControlFlow::Continue(()))
    }

    /// [`ThinningEngine::resume`] with a per-pass callback, as in
    /// [`ThinningEngine::thin_with`].
    pub fn resume_with<F>(
        &mut self,
        grid: &mut VoxelGrid,
        cfg: &ThinningConfig,
        mut report: ThinningReport,
        mut on_pass: F,
    ) -> ThinningReport
    where
        F: FnMut(&PassOutcome) -> ControlFlow<()>,
    {
        let [width, height, depth] = grid.extents();
        let _span = debug_span!("thin", width, height, depth).entered();

        while let ThinningState::Running { direction, cycle } = report.state {
            if direction == BorderDirection::North {
                if let Some(max) = cfg.max_cycles
                    && cycle > max
                {
                    break;
                }
                report.quiet_passes = 0;
            }

            let outcome = self.pass(grid, direction, cycle, cfg);
            report.cycles = cycle;
            report.passes += 1;
            report.deleted += outcome.deleted;
            report.rolled_back += outcome.rolled_back;
            if outcome.deleted == 0 {
                report.quiet_passes += 1;
            }

            report.state = match direction.next() {
                Some(next) => ThinningState::Running {
                    direction: next,
                    cycle,
                },
                None if report.quiet_passes == BorderDirection::ALL.len() => {
                    ThinningState::Converged
                }
                None => ThinningState::Running {
                    direction: BorderDirection::North,
                    cycle: cycle + 1,
                },
            };

            if on_pass(&outcome).is_break() {
                break;
            }
        }

        if report.converged() {
            info!(
                cycles = report.cycles,
                deleted = report.deleted,
                remaining = grid.count_foreground(),
                "thinning converged"
            );
        } else {
            info!(
                cycles = report.cycles,
                deleted = report.deleted,
                state = ?report.state,
                "thinning stopped before convergence"
            );
        }

        report
    }

    /// Runs one direction pass: candidate collection followed by sequential
    /// deletion with re-verification.
    pub fn pass(
        &mut self,
        grid: &mut VoxelGrid,
        direction: BorderDirection,
        cycle: usize,
        cfg: &ThinningConfig,
    ) -> PassOutcome {
        self.collect_candidates(grid, direction);

        let mut deleted = 0;
        let mut rolled_back = 0;
        for &v in &self.candidates {
            grid.set_voxel(v, false);

            let n = Neighborhood::sample_voxel(grid, v);
            let isolated = cfg.guard_isolated && n.count_neighbors() == 0;
            if isolated || !is_simple_point(&n) {
                grid.set_voxel(v, true);
                rolled_back += 1;
                trace!(x = v[0], y = v[1], z = v[2], isolated, "deletion rolled back");
            } else {
                deleted += 1;
            }
        }

        debug!(
            direction = direction.name(),
            cycle,
            candidates = self.candidates.len(),
            deleted,
            rolled_back,
            "direction pass"
        );

        PassOutcome {
            direction,
            cycle,
            candidates: self.candidates.len(),
            deleted,
            rolled_back,
        }
    }

    /// Deletable border points of `direction` in scan order (x fastest, then
    /// y, then z). The grid is not modified.
    pub fn collect_candidates(&mut self, grid: &VoxelGrid, direction: BorderDirection) -> &[Voxel] {
        self.candidates.clear();
        for v in grid.iter_foreground() {
            if !is_border_point(grid, v, direction) {
                continue;
            }
            if is_deletable(&Neighborhood::sample_voxel(grid, v)) {
                self.candidates.push(v);
            }
        }
        &self.candidates
    }
}

/// Thins `grid` in place with the default configuration.
pub fn thin(grid: &mut VoxelGrid) -> ThinningReport {
    ThinningEngine::new().thin(grid, &ThinningConfig::default())
}

/// Returns the skeleton of `grid`, leaving the input untouched.
pub fn skeletonize(grid: &VoxelGrid) -> VoxelGrid {
    let mut out = grid.clone();
    thin(&mut out);
    out
}
