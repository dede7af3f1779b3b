use crate::grid::VoxelGrid;

/// Index of the center voxel inside a [`Neighborhood`].
pub const CENTER: usize = 13;

/// Relative `(dx, dy, dz)` of every neighborhood slot in raster order:
/// z outermost, then y, then x, each running `-1..=1`.
pub const OFFSETS: [[isize; 3]; 27] = {
    let mut out = [[0isize; 3]; 27];
    let mut i = 0;
    while i < 27 {
        out[i] = [(i % 3) as isize - 1, ((i / 3) % 3) as isize - 1, (i / 9) as isize - 1];
        i += 1;
    }
    out
};

/// Snapshot of the 3x3x3 cube around a voxel.
///
/// The slot order is fixed; the Euler and simple-point tables index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood([bool; 27]);

impl Neighborhood {
    pub fn sample(grid: &VoxelGrid, x: isize, y: isize, z: isize) -> Self {
        let mut n = [false; 27];
        for (slot, d) in n.iter_mut().zip(OFFSETS.iter()) {
            *slot = grid.get(x + d[0], y + d[1], z + d[2]);
        }
        Self(n)
    }

    pub fn sample_voxel(grid: &VoxelGrid, v: [usize; 3]) -> Self {
        Self::sample(grid, v[0] as isize, v[1] as isize, v[2] as isize)
    }

    pub fn from_array(values: [bool; 27]) -> Self {
        Self(values)
    }

    /// Builds a neighborhood from the foreground slot indices.
    pub fn from_indices(indices: &[usize]) -> Self {
        let mut n = [false; 27];
        for &i in indices {
            n[i] = true;
        }
        Self(n)
    }

    pub fn as_array(&self) -> &[bool; 27] {
        &self.0
    }

    pub fn get(&self, i: usize) -> bool {
        self.0[i]
    }

    pub fn center(&self) -> bool {
        self.0[CENTER]
    }

    /// Foreground voxels among the 26 neighbors, center excluded.
    pub fn count_neighbors(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|&(i, &v)| i != CENTER && v)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{CENTER, Neighborhood, OFFSETS};
    use crate::VoxelGrid;

    #[test]
    fn offsets_follow_raster_order() {
        assert_eq!(OFFSETS[0], [-1, -1, -1]);
        assert_eq!(OFFSETS[1], [0, -1, -1]);
        assert_eq!(OFFSETS[4], [0, 0, -1]);
        assert_eq!(OFFSETS[10], [0, -1, 0]);
        assert_eq!(OFFSETS[12], [-1, 0, 0]);
        assert_eq!(OFFSETS[CENTER], [0, 0, 0]);
        assert_eq!(OFFSETS[14], [1, 0, 0]);
        assert_eq!(OFFSETS[16], [0, 1, 0]);
        assert_eq!(OFFSETS[22], [0, 0, 1]);
        assert_eq!(OFFSETS[26], [1, 1, 1]);
    }

    #[test]
    fn sample_reads_each_offset() {
        let mut grid = VoxelGrid::new(3, 3, 3).expect("valid grid");
        grid.set(1, 1, 1, true);
        grid.set(2, 1, 1, true);
        grid.set(0, 0, 2, true);

        let n = Neighborhood::sample(&grid, 1, 1, 1);
        assert!(n.center());
        assert!(n.get(14));
        assert!(n.get(18));
        assert_eq!(n.count_neighbors(), 2);
    }

    #[test]
    fn sample_at_corner_pads_with_background() {
        let mut grid = VoxelGrid::new_2d(2, 2).expect("valid grid");
        for y in 0..2 {
            for x in 0..2 {
                grid.set(x, y, 0, true);
            }
        }

        let n = Neighborhood::sample(&grid, 0, 0, 0);
        let on: Vec<usize> = (0..27).filter(|&i| n.get(i)).collect();
        assert_eq!(on, vec![13, 14, 16, 17]);
    }
}
