use vt_core::{Result, VoxelGrid};

use crate::engine::{ThinningConfig, ThinningEngine, ThinningReport};

impl ThinningEngine {
    /// Thins every z-plane of `grid` as an independent 2D image.
    ///
    /// Voxels in different planes never influence each other, unlike
    /// [`ThinningEngine::thin`] which treats the grid as one volume. Returns
    /// one report per plane, in plane order.
    pub fn thin_planes(
        &mut self,
        grid: &mut VoxelGrid,
        cfg: &ThinningConfig,
    ) -> Result<Vec<ThinningReport>> {
        let mut reports = Vec::with_capacity(grid.depth());
        for z in 0..grid.depth() {
            let mut plane = grid.plane(z)?;
            reports.push(self.thin(&mut plane, cfg));
            grid.set_plane(z, &plane)?;
        }
        Ok(reports)
    }
}

/// Plane-wise thinning with the default configuration.
pub fn thin_planes(grid: &mut VoxelGrid) -> Result<Vec<ThinningReport>> {
    ThinningEngine::new().thin_planes(grid, &ThinningConfig::default())
}
