use super::heightmap::{HeightMap, HeightMapError};

use ndarray::prelude::*;
use noise::{NoiseFn, Perlin};

#[derive(Clone, Copy, Debug)]
pub struct NoiseSettings {
    pub scale: f32,
    pub octaves: usize,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 5e-3,
            octaves: 8,
        }
    }
}

fn fractal_sample(perlin: &Perlin, settings: NoiseSettings, row: usize, col: usize) -> f32 {
    (0..settings.octaves)
        .map(|octave| {
            let amplitude = 0.5f32.powi(octave as i32);
            let frequency = settings.scale / amplitude;
            amplitude
                * perlin.get([
                    (octave as f32 * 1000. + frequency * row as f32) as f64,
                    (frequency * col as f32) as f64,
                ]) as f32
        })
        .sum()
}

/// Fractal Perlin terrain quantized to 8-bit samples, `height` rows of `width` samples.
///
/// Only used as a fallback when the heightmap image is missing and the caller opted in.
pub fn perlin_terrain(
    (width, height): (usize, usize),
    seed: u32,
    noise_settings: NoiseSettings,
) -> Result<HeightMap, HeightMapError> {
    let perlin = Perlin::new(seed);

    // Sum of the geometric amplitude series 1 + 1/2 + ... over all octaves.
    let bound = 2. - 0.5f32.powi(noise_settings.octaves as i32 - 1);
    let bound = bound.max(f32::EPSILON);

    let samples = Array2::from_shape_fn((height, width), |(row, col)| {
        let value = fractal_sample(&perlin, noise_settings, row, col) / bound;
        ((value + 1.) / 2. * 255.).clamp(0., 255.) as u8
    });

    HeightMap::new(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_matches_request() {
        let terrain = perlin_terrain((12, 5), 2, NoiseSettings::default()).unwrap();

        assert_eq!(terrain.width(), 12);
        assert_eq!(terrain.height(), 5);
    }

    #[test]
    fn same_seed_same_terrain() {
        let settings = NoiseSettings {
            scale: 0.05,
            octaves: 4,
        };
        let a = perlin_terrain((16, 16), 7, settings).unwrap();
        let b = perlin_terrain((16, 16), 7, settings).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn zero_octaves_is_mid_gray() {
        let settings = NoiseSettings {
            scale: 0.05,
            octaves: 0,
        };
        let terrain = perlin_terrain((4, 4), 1, settings).unwrap();

        assert!(terrain.samples().iter().all(|&s| s == 127));
    }
}
