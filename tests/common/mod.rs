//! Synthetic images shared by the integration tests.

#![allow(dead_code)]

use findimg::{Raster, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grid of random corner values for one octave of value noise.
struct Lattice {
    cell: f64,
    cols: usize,
    values: Vec<f64>,
}

impl Lattice {
    fn new(width: usize, height: usize, cell: f64, seed: u64) -> Self {
        let cols = (width as f64 / cell) as usize + 2;
        let rows = (height as f64 / cell) as usize + 2;
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..cols * rows).map(|_| rng.random::<f64>()).collect();
        Self { cell, cols, values }
    }

    fn at(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.cols + ix]
    }

    fn sample(&self, x: usize, y: usize) -> f64 {
        let fx = x as f64 / self.cell;
        let fy = y as f64 / self.cell;
        let (ix, iy) = (fx.floor(), fy.floor());
        let tx = smoothstep(fx - ix);
        let ty = smoothstep(fy - iy);
        let (ix, iy) = (ix as usize, iy as usize);
        let a = self.at(ix, iy);
        let b = self.at(ix + 1, iy);
        let c = self.at(ix, iy + 1);
        let d = self.at(ix + 1, iy + 1);
        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        top + (bottom - top) * ty
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Octaves of value noise: (cell size, amplitude).
const OCTAVES: [(f64, f64); 4] = [(96.0, 0.4), (48.0, 0.3), (24.0, 0.2), (12.0, 0.1)];

/// Multi-octave color texture, distinctive at every pyramid width.
pub fn textured_haystack(width: usize, height: usize) -> Raster {
    let channels: Vec<Vec<(Lattice, f64)>> = (0..3u64)
        .map(|c| {
            OCTAVES
                .iter()
                .zip(0u64..)
                .map(|(&(cell, amp), i)| (Lattice::new(width, height, cell, c * 7 + i), amp))
                .collect()
        })
        .collect();
    Raster::from_fn(width, height, |x, y| {
        let mut px = [0u8; 3];
        for (octaves, out) in channels.iter().zip(px.iter_mut()) {
            let v: f64 = octaves
                .iter()
                .map(|(lattice, amp)| amp * lattice.sample(x, y))
                .sum();
            *out = (v * 255.0).min(255.0) as u8;
        }
        px
    })
    .unwrap()
}

/// True if `a` and `b` overlap by at least `min` pixels in both directions.
pub fn overlaps_by(a: &Rect, b: &Rect, min: usize) -> bool {
    let itr = a.intersect(b);
    !itr.is_empty() && itr.width() >= min && itr.height() >= min
}
