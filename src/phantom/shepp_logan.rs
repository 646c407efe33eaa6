//! The (modified) Shepp–Logan head phantom, rendered analytically at any
//! resolution and mapped affinely onto a μ range.

use itertools::iproduct;
use serde::Deserialize;

use crate::grid::Grid;
use crate::types::{Attenuationf32, MuMap};

/// μ = offset + gain · (Shepp–Logan intensity)
///
/// Different uses want different calibrations, so this is configuration
/// rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReferenceCalibration {
    pub offset: Attenuationf32,
    pub gain: Attenuationf32,
}

impl Default for ReferenceCalibration {
    fn default() -> Self { Self { offset: 0.1, gain: 1.5 } }
}

/// `(intensity, semi-axis a, semi-axis b, x0, y0, tilt in degrees)`, with
/// `x` pointing right and `y` pointing up, in a `[-1, 1]²` field.
const MODIFIED_SHEPP_LOGAN: [(f32, f32, f32, f32, f32, f32); 10] = [
    ( 1.0, 0.69  , 0.92  ,  0.0 ,  0.0   ,   0.0),
    (-0.8, 0.6624, 0.8740,  0.0 , -0.0184,   0.0),
    (-0.2, 0.1100, 0.3100,  0.22,  0.0   , -18.0),
    (-0.2, 0.1600, 0.4100, -0.22,  0.0   ,  18.0),
    ( 0.1, 0.2100, 0.2500,  0.0 ,  0.35  ,   0.0),
    ( 0.1, 0.0460, 0.0460,  0.0 ,  0.1   ,   0.0),
    ( 0.1, 0.0460, 0.0460,  0.0 , -0.1   ,   0.0),
    ( 0.1, 0.0460, 0.0230, -0.08, -0.605 ,   0.0),
    ( 0.1, 0.0230, 0.0230,  0.0 , -0.606 ,   0.0),
    ( 0.1, 0.0230, 0.0460,  0.06, -0.605 ,   0.0),
];

/// Sub-samples per pixel side, for anti-aliasing
const SUPERSAMPLE: usize = 4;

fn intensity_at(x: f32, y: f32) -> f32 {
    MODIFIED_SHEPP_LOGAN.iter()
        .filter(|&&(_, a, b, x0, y0, tilt)| {
            let (sin, cos) = tilt.to_radians().sin_cos();
            let (dx, dy) = (x - x0, y - y0);
            let u = ( dx * cos + dy * sin) / a;
            let v = (-dx * sin + dy * cos) / b;
            u * u + v * v <= 1.0
        })
        .map(|&(intensity, ..)| intensity)
        .sum()
}

/// Shepp–Logan intensities in `[0, 1]`, each pixel the mean over a
/// `SUPERSAMPLE²` lattice covering its area. Row 0 is the top of the head.
pub fn shepp_logan(grid: &Grid) -> MuMap {
    let (rows, cols) = grid.shape();
    let k = SUPERSAMPLE as f32;
    grid.map(|p| {
        let total: f32 = iproduct!(0..SUPERSAMPLE, 0..SUPERSAMPLE)
            .map(|(si, sj)| {
                let x = -1.0 + 2.0 * (p.j as f32 + (sj as f32 + 0.5) / k) / cols as f32;
                let y =  1.0 - 2.0 * (p.i as f32 + (si as f32 + 0.5) / k) / rows as f32;
                intensity_at(x, y)
            })
            .sum();
        total / (k * k)
    })
}

pub fn reference(grid: &Grid, calibration: &ReferenceCalibration) -> MuMap {
    let ReferenceCalibration { offset, gain } = *calibration;
    shepp_logan(grid).mapv_into(|v| offset + gain * v)
}
