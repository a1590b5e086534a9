use std::path::{Path, PathBuf};

use bevy::prelude::Vec3;
use image::DynamicImage;
use ndarray::Array2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeightMapError {
    #[error("could not decode heightmap image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("heightmap of {width}x{height} samples does not fit in a u32 index buffer")]
    TooLarge { width: usize, height: usize },
    #[error("expected {expected} sample bytes, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Vertical mapping from an 8-bit sample to a world-space height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightScale {
    pub y_scale: f32,
    pub y_offset: f32,
}

impl Default for HeightScale {
    fn default() -> Self {
        Self {
            y_scale: 64. / 256.,
            y_offset: 16.,
        }
    }
}

impl HeightScale {
    pub fn apply(&self, sample: u8) -> f32 {
        sample as f32 * self.y_scale - self.y_offset
    }
}

/// Grid of grayscale samples indexed `[[row, col]]`, `height` rows of `width` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap(Array2<u8>);

impl HeightMap {
    pub fn new(samples: Array2<u8>) -> Result<Self, HeightMapError> {
        let (height, width) = samples.dim();
        if width
            .checked_mul(height)
            .map_or(true, |count| count > u32::MAX as usize)
        {
            return Err(HeightMapError::TooLarge { width, height });
        }
        Ok(Self(samples))
    }

    pub fn empty() -> Self {
        Self(Array2::zeros((0, 0)))
    }

    /// Builds a map from interleaved pixel bytes, keeping only the first channel of each pixel.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        bytes: &[u8],
    ) -> Result<Self, HeightMapError> {
        let expected = width
            .checked_mul(height)
            .and_then(|count| count.checked_mul(channels))
            .ok_or(HeightMapError::TooLarge { width, height })?;
        if channels == 0 || bytes.len() != expected {
            return Err(HeightMapError::ShapeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let samples = bytes.iter().step_by(channels).copied().collect::<Vec<_>>();
        let samples = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            HeightMapError::ShapeMismatch {
                expected: width * height,
                actual: bytes.len() / channels,
            }
        })?;

        Self::new(samples)
    }

    pub fn from_image(image: DynamicImage) -> Result<Self, HeightMapError> {
        // Anything wider than 8 bits per channel is narrowed first.
        let image = match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => image,
            other => DynamicImage::ImageRgba8(other.into_rgba8()),
        };

        let channels = image.color().channel_count() as usize;
        Self::from_interleaved(
            image.width() as usize,
            image.height() as usize,
            channels,
            image.as_bytes(),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HeightMapError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| HeightMapError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(image)
    }

    /// Position of the sample at `(row, col)`.
    ///
    /// Both axes are centred on `width / 2` (integer division), so maps that are
    /// taller than they are wide extend further along +x than -x.
    pub fn vertex_at(&self, row: usize, col: usize, scale: HeightScale) -> Vec3 {
        let half_width = (self.width() / 2) as f32;
        Vec3 {
            x: row as f32 - half_width,
            y: scale.apply(self.sample_at(row, col)),
            z: col as f32 - half_width,
        }
    }

    pub fn sample_at(&self, row: usize, col: usize) -> u8 {
        self.0[[row, col]]
    }

    pub fn width(&self) -> usize {
        self.0.dim().1
    }

    pub fn height(&self) -> usize {
        self.0.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn samples(&self) -> &Array2<u8> {
        &self.0
    }
}
