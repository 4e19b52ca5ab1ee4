//! Square heightfield grid: the shared substrate every generator and
//! erosion model reads and mutates.
//!
//! Heights are nominally in [0, 1] (the host's normalized elevation
//! convention); synthesis may transiently exceed that range and callers
//! clamp on write-back via [`Grid::clamp_heights`]. All neighbour queries
//! clamp coordinates into bounds rather than failing.

use serde::{Deserialize, Serialize};

/// Row-major square array of f32 heights, indexed `(x, y)` with
/// `index = x * resolution + y`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub data: Vec<f32>,
    pub resolution: usize,
}

impl Grid {
    /// Create a zero-filled grid of the given resolution.
    pub fn new(resolution: usize) -> Self {
        Self {
            data: vec![0.0; resolution * resolution],
            resolution,
        }
    }

    /// Create a grid filled with a constant height.
    pub fn filled(resolution: usize, fill: f32) -> Self {
        Self {
            data: vec![fill; resolution * resolution],
            resolution,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x * self.resolution + y]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        debug_assert!(val.is_finite(), "non-finite height at ({x}, {y})");
        self.data[x * self.resolution + y] = val;
    }

    /// Clamp an arbitrary signed coordinate pair into [0, R-1]².
    #[inline]
    pub fn clamped(&self, x: i64, y: i64) -> (usize, usize) {
        let max = self.resolution as i64 - 1;
        (x.clamp(0, max) as usize, y.clamp(0, max) as usize)
    }

    /// The distinct grid-clamped Moore neighbours of `(x, y)`.
    ///
    /// Interior cells yield 8 entries; border and corner cells fewer,
    /// because offsets that clamp onto an already-collected cell (or the
    /// cell itself) are dropped. Averaging divisors and neighbour-driven
    /// erosion both rely on this.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = Vec::with_capacity(8);
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = self.clamped(x as i64 + dx, y as i64 + dy);
                if n != (x, y) && !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Read a rectangular region, row-major in `x` then `y`, clipped to the
    /// grid bounds. The host backing-store read contract.
    pub fn read_region(&self, x0: usize, y0: usize, width: usize, height: usize) -> Vec<f32> {
        let x1 = (x0 + width).min(self.resolution);
        let y1 = (y0 + height).min(self.resolution);
        let mut out = Vec::with_capacity((x1.saturating_sub(x0)) * (y1.saturating_sub(y0)));
        for x in x0..x1 {
            for y in y0..y1 {
                out.push(self.get(x, y));
            }
        }
        out
    }

    /// Write a rectangular region read with the same shape; out-of-bounds
    /// cells are skipped, and cells past the end of a short `data` buffer
    /// are left unchanged. The host backing-store write contract.
    pub fn write_region(&mut self, x0: usize, y0: usize, width: usize, height: usize, data: &[f32]) {
        for (i, &val) in data.iter().enumerate().take(width * height) {
            let x = x0 + i / height;
            let y = y0 + i % height;
            if x < self.resolution && y < self.resolution {
                self.set(x, y, val);
            }
        }
    }

    /// Refill the grid with zero height.
    pub fn reset(&mut self) {
        self.data.fill(0.0);
    }

    /// Clamp every height into [0, 1].
    pub fn clamp_heights(&mut self) {
        for h in &mut self.data {
            *h = h.clamp(0.0, 1.0);
        }
    }

    pub fn min_height(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_height(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Slope in degrees at a normalized coordinate, for splat/vegetation
    /// consumers. Horn 3×3 weighted gradient in grid units, evaluated at the
    /// nearest interior cell.
    pub fn steepness(&self, norm_x: f32, norm_y: f32) -> f32 {
        if self.resolution < 3 {
            return 0.0;
        }
        let max = self.resolution - 2;
        let cx = ((norm_x.clamp(0.0, 1.0) * (self.resolution - 1) as f32) as usize).clamp(1, max);
        let cy = ((norm_y.clamp(0.0, 1.0) * (self.resolution - 1) as f32) as usize).clamp(1, max);

        let z = |dx: i64, dy: i64| self.get((cx as i64 + dx) as usize, (cy as i64 + dy) as usize) as f64;

        let dz_dx = ((z(1, -1) + 2.0 * z(1, 0) + z(1, 1)) - (z(-1, -1) + 2.0 * z(-1, 0) + z(-1, 1))) / 8.0;
        let dz_dy = ((z(-1, 1) + 2.0 * z(0, 1) + z(1, 1)) - (z(-1, -1) + 2.0 * z(0, -1) + z(1, -1))) / 8.0;

        ((dz_dx * dz_dx + dz_dy * dz_dy).sqrt().atan().to_degrees()) as f32
    }
}
