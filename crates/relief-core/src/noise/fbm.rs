//! Base coherent noise and fractal Brownian motion.
//!
//! fBM here uses the inverted persistence convention: octave `i` is
//! weighted `persistence^(-i)`, so persistence > 1 attenuates higher
//! octaves sharply. The layer defaults (persistence around 8) are tuned
//! for this convention; it is deliberately not the conventional
//! gain-per-octave form.

use noise::{NoiseFn, Perlin};

/// Seeded 2-D coherent noise remapped into [0, 1].
pub struct BaseNoise {
    perlin: Perlin,
}

impl BaseNoise {
    pub fn new(seed: u32) -> Self {
        Self { perlin: Perlin::new(seed) }
    }

    /// Sample at `(x, y)`, remapped from Perlin's ±1 range into [0, 1].
    #[inline]
    pub fn sample01(&self, x: f32, y: f32) -> f32 {
        (self.perlin.get([x as f64, y as f64]) as f32 + 1.0) * 0.5
    }

    /// Fractal Brownian motion: `octaves` layers of the base noise, each at
    /// doubled frequency and amplitude `persistence^(-i)`. Output is not
    /// normalized; callers scale by their own height factor. With
    /// `octaves = 1` this is exactly one base sample.
    pub fn fbm(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0f32;
        let mut frequency = 1.0f32;
        let mut amplitude = 1.0f32;
        for _ in 0..octaves {
            total += self.sample01(x * frequency, y * frequency) * amplitude;
            amplitude /= persistence;
            frequency *= 2.0;
        }
        debug_assert!(total.is_finite(), "non-finite fBM at ({x}, {y})");
        total
    }
}
