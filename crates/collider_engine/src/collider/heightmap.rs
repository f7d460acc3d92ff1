//! Square height grids for walkable surfaces

use serde::{Deserialize, Serialize};

use super::ColliderError;

/// Square grid of surface heights with `resolution + 1` samples per axis.
///
/// Samples are stored row-major: Z rows, X columns. The sample count is
/// always `(resolution + 1)²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHeightMap")]
pub struct HeightMap {
    resolution: usize,
    samples: Vec<f32>,
}

#[derive(Deserialize)]
struct RawHeightMap {
    resolution: usize,
    samples: Vec<f32>,
}

impl TryFrom<RawHeightMap> for HeightMap {
    type Error = ColliderError;

    fn try_from(raw: RawHeightMap) -> Result<Self, Self::Error> {
        Self::new(raw.resolution, raw.samples)
    }
}

impl HeightMap {
    /// Create a height map, checking the sample count
    pub fn new(resolution: usize, samples: Vec<f32>) -> Result<Self, ColliderError> {
        let expected = Self::sample_count(resolution);
        if resolution == 0 || samples.len() != expected {
            return Err(ColliderError::HeightMapSize {
                resolution,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { resolution, samples })
    }

    /// Number of samples a grid of `resolution` cells per axis carries
    pub const fn sample_count(resolution: usize) -> usize {
        (resolution + 1) * (resolution + 1)
    }

    /// Grid of identical heights. A zero resolution is raised to one cell.
    pub fn flat(resolution: usize, height: f32) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            samples: vec![height; Self::sample_count(resolution)],
        }
    }

    /// Build a grid by evaluating `height(ix, iz)` at every sample.
    /// A zero resolution is raised to one cell.
    pub fn from_fn(resolution: usize, mut height: impl FnMut(usize, usize) -> f32) -> Self {
        let resolution = resolution.max(1);
        let mut samples = Vec::with_capacity(Self::sample_count(resolution));
        for iz in 0..=resolution {
            for ix in 0..=resolution {
                samples.push(height(ix, iz));
            }
        }
        Self { resolution, samples }
    }

    /// Cells per axis
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Raw samples, row-major by Z then X
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at grid coordinates, clamped to the grid extent
    pub fn get(&self, ix: usize, iz: usize) -> f32 {
        let ix = ix.min(self.resolution);
        let iz = iz.min(self.resolution);
        self.samples[iz * (self.resolution + 1) + ix]
    }

    /// Copy with every sample passed through `f`
    pub fn map_heights(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            resolution: self.resolution,
            samples: self.samples.iter().map(|&h| f(h)).collect(),
        }
    }
}
