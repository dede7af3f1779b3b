//! Connected components and cavities of binary voxel grids.
//!
//! Foreground is counted with 26-connectivity and background with
//! 6-connectivity, the dual pair under which thinning preserves topology.
//! On a depth-1 grid this reduces to 8-connected objects and 4-connected
//! holes.
//!
//! A background component is a cavity when it does not reach the grid
//! boundary along any axis whose extent is larger than one. A flat image is
//! therefore not considered open through its top and bottom faces.

use vt_core::{Voxel, VoxelGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    C6,
    C26,
}

const FACE_OFFSETS: [[isize; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

const ALL_OFFSETS: [[isize; 3]; 26] = {
    let mut out = [[0isize; 3]; 26];
    let mut i = 0;
    let mut k = 0;
    while i < 27 {
        if i != 13 {
            out[k] = [(i % 3) as isize - 1, ((i / 3) % 3) as isize - 1, (i / 9) as isize - 1];
            k += 1;
        }
        i += 1;
    }
    out
};

fn offsets_for(conn: Connectivity) -> &'static [[isize; 3]] {
    match conn {
        Connectivity::C6 => &FACE_OFFSETS,
        Connectivity::C26 => &ALL_OFFSETS,
    }
}

/// Component label per voxel; `0` marks voxels of the other value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling {
    pub extents: [usize; 3],
    pub labels: Vec<u32>,
    pub count: usize,
}

impl Labeling {
    pub fn label_at(&self, v: Voxel) -> u32 {
        let [w, h, _] = self.extents;
        self.labels[(v[2] * h + v[1]) * w + v[0]]
    }
}

/// Labels the components formed by voxels equal to `value`, starting at 1,
/// in scan order of their first voxel.
pub fn label_components(grid: &VoxelGrid, value: bool, conn: Connectivity) -> Labeling {
    let [w, h, d] = grid.extents();
    let offsets = offsets_for(conn);
    let mut labels = vec![0u32; grid.len()];
    let mut count = 0usize;
    let mut stack = Vec::new();

    for start in 0..grid.len() {
        if grid.data()[start] != value || labels[start] != 0 {
            continue;
        }

        count += 1;
        let label = count as u32;
        labels[start] = label;
        stack.push(start);

        while let Some(p) = stack.pop() {
            let (x, y, z) = ((p % w) as isize, ((p / w) % h) as isize, (p / (w * h)) as isize);
            for o in offsets {
                let (nx, ny, nz) = (x + o[0], y + o[1], z + o[2]);
                if nx < 0 || ny < 0 || nz < 0 {
                    continue;
                }
                let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                if nx >= w || ny >= h || nz >= d {
                    continue;
                }

                let q = (nz * h + ny) * w + nx;
                if grid.data()[q] == value && labels[q] == 0 {
                    labels[q] = label;
                    stack.push(q);
                }
            }
        }
    }

    Labeling {
        extents: [w, h, d],
        labels,
        count,
    }
}

/// 26-connected foreground components.
pub fn count_components(grid: &VoxelGrid) -> usize {
    label_components(grid, true, Connectivity::C26).count
}

/// 6-connected background components enclosed by foreground.
pub fn count_cavities(grid: &VoxelGrid) -> usize {
    let labeling = label_components(grid, false, Connectivity::C6);
    if labeling.count == 0 {
        return 0;
    }

    let extents = grid.extents();
    let mut open = vec![false; labeling.count + 1];
    for (i, &label) in labeling.labels.iter().enumerate() {
        if label == 0 || open[label as usize] {
            continue;
        }

        let [w, h, _] = extents;
        let pos = [i % w, (i / w) % h, i / (w * h)];
        let on_boundary = (0..3).any(|axis| {
            extents[axis] > 1 && (pos[axis] == 0 || pos[axis] == extents[axis] - 1)
        });
        if on_boundary {
            open[label as usize] = true;
        }
    }

    open[1..].iter().filter(|&&o| !o).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologySummary {
    pub foreground: usize,
    pub components: usize,
    pub cavities: usize,
}

impl TopologySummary {
    /// Same components and cavities; voxel counts may differ.
    pub fn same_topology(&self, other: &Self) -> bool {
        self.components == other.components && self.cavities == other.cavities
    }
}

pub fn summarize(grid: &VoxelGrid) -> TopologySummary {
    TopologySummary {
        foreground: grid.count_foreground(),
        components: count_components(grid),
        cavities: count_cavities(grid),
    }
}
