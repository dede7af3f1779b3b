use crate::{Error, Result};

/// Integer voxel coordinate `(x, y, z)`.
pub type Voxel = [usize; 3];

/// Dense binary volume with a fixed background boundary.
///
/// Storage is x-fastest, then y, then z. Any coordinate outside
/// `[0, width) x [0, height) x [0, depth)` reads as background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<bool>,
}

impl VoxelGrid {
    /// All-background grid.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        let len = voxel_count(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![false; len],
        })
    }

    /// Single-plane grid, the usual shape for 2D images.
    pub fn new_2d(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, 1)
    }

    pub fn from_vec(width: usize, height: usize, depth: usize, data: Vec<bool>) -> Result<Self> {
        let expected = voxel_count(width, height, depth)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    /// Binarizes arbitrary samples: anything other than `T::default()` is
    /// foreground.
    pub fn from_nonzero<T: PartialEq + Default>(
        width: usize,
        height: usize,
        depth: usize,
        values: &[T],
    ) -> Result<Self> {
        let expected = voxel_count(width, height, depth)?;
        if values.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        let zero = T::default();
        let data = values.iter().map(|v| *v != zero).collect();
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn extents(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Reads a voxel; out-of-extent coordinates are background.
    pub fn get(&self, x: isize, y: isize, z: isize) -> bool {
        match self.linear_index(x, y, z) {
            Some(idx) => self.data[idx],
            None => false,
        }
    }

    pub fn get_voxel(&self, v: Voxel) -> bool {
        v[0] < self.width && v[1] < self.height && v[2] < self.depth && self.data[self.idx(v)]
    }

    /// Writes a voxel; out-of-extent coordinates are ignored.
    pub fn set(&mut self, x: isize, y: isize, z: isize, value: bool) {
        if let Some(idx) = self.linear_index(x, y, z) {
            self.data[idx] = value;
        }
    }

    pub fn set_voxel(&mut self, v: Voxel, value: bool) {
        if v[0] < self.width && v[1] < self.height && v[2] < self.depth {
            let idx = self.idx(v);
            self.data[idx] = value;
        }
    }

    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Foreground voxels in storage order.
    pub fn iter_foreground(&self) -> impl Iterator<Item = Voxel> + '_ {
        let (w, h) = (self.width, self.height);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| [i % w, (i / w) % h, i / (w * h)])
    }

    /// Copies plane `z` into a depth-1 grid.
    pub fn plane(&self, z: usize) -> Result<VoxelGrid> {
        if z >= self.depth {
            return Err(Error::PlaneOutOfBounds {
                z,
                depth: self.depth,
            });
        }

        let n = self.width * self.height;
        let start = z * n;
        Ok(VoxelGrid {
            width: self.width,
            height: self.height,
            depth: 1,
            data: self.data[start..start + n].to_vec(),
        })
    }

    /// Overwrites plane `z` with a depth-1 grid of matching width and height.
    pub fn set_plane(&mut self, z: usize, plane: &VoxelGrid) -> Result<()> {
        if z >= self.depth {
            return Err(Error::PlaneOutOfBounds {
                z,
                depth: self.depth,
            });
        }

        let n = self.width * self.height;
        if plane.width != self.width || plane.height != self.height || plane.depth != 1 {
            return Err(Error::SizeMismatch {
                expected: n,
                actual: plane.len(),
            });
        }

        let start = z * n;
        self.data[start..start + n].copy_from_slice(&plane.data);
        Ok(())
    }

    /// Exports the grid as bytes: `on` for foreground, `0` for background.
    pub fn to_u8(&self, on: u8) -> Vec<u8> {
        self.data.iter().map(|&v| if v { on } else { 0 }).collect()
    }

    fn idx(&self, v: Voxel) -> usize {
        (v[2] * self.height + v[1]) * self.width + v[0]
    }

    fn linear_index(&self, x: isize, y: isize, z: isize) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some((z * self.height + y) * self.width + x)
    }
}

fn voxel_count(width: usize, height: usize, depth: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(depth))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(Error::ExtentOverflow {
            width,
            height,
            depth,
        })
}
