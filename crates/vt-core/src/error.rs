use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("extents {width}x{height}x{depth} overflow the addressable voxel count")]
    ExtentOverflow {
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("plane {z} out of bounds for depth {depth}")]
    PlaneOutOfBounds { z: usize, depth: usize },
}

impl Error {
    /// Malformed input that must be rejected before thinning starts.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. } | Self::ExtentOverflow { .. })
    }
}
