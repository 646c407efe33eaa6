//! Geometric transforms applied to a μ-map before projection.
//!
//! + `rotate`: rotation about the grid centre
//!
//! + `magnify`: projective magnification by `M = SDD / SID`
//!
//! Both preserve the shape of their input. Sampling is bilinear, and points
//! falling outside the grid take the value of the nearest edge pixel.

use float_eq::float_eq;
use ndarray::{Array2, ArrayView2};
use tracing::debug;

use crate::error::{positive, Result, XrayError};
use crate::types::{Anglef32, Lengthf32, MuMap, Ratiof32, Shape2};

/// Rotate `mu` counter-clockwise by `angle_deg` about its centre.
///
/// Multiples of 360° (including 0°) return an exact copy.
pub fn rotate(mu: &MuMap, angle_deg: Anglef32) -> MuMap {
    if mu.is_empty() || angle_deg.rem_euclid(360.0) == 0.0 { return mu.clone() }

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (nr, nc) = mu.dim();
    let (cr, cc) = ((nr - 1) as f32 / 2.0, (nc - 1) as f32 / 2.0);
    let view = mu.view();

    // Inverse rotation: find where each output pixel came from
    Array2::from_shape_fn((nr, nc), |(i, j)| {
        let (x, y) = (i as f32 - cr, j as f32 - cc);
        let x_in =  cos * x + sin * y;
        let y_in = -sin * x + cos * y;
        sample_clamped(&view, x_in + cr, y_in + cc)
    })
}

/// Magnification factor of an object at the isocentre
pub fn magnification(sid: Lengthf32, sdd: Lengthf32) -> Result<Ratiof32> {
    let sid = positive("sid", sid)?;
    let sdd = positive("sdd", sdd)?;
    let m = sdd / sid;
    if !m.is_finite() {
        return Err(XrayError::InvalidParameter { name: "sdd", value: sdd, reason: "SDD / SID must be finite" });
    }
    Ok(m)
}

/// Rescale `mu` by `M = sdd / sid` about its centre, keeping its shape.
///
/// Equivalent to a bilinear zoom onto `round(n·M)` pixels per axis followed
/// by `fit_to_shape`: enlarged content is cropped symmetrically, shrunk
/// content is padded by replicating the edges. Each output pixel is mapped
/// straight back to its source position, so the zoomed grid is never built.
/// `M ≈ 1` returns a copy.
pub fn magnify(mu: &MuMap, sid: Lengthf32, sdd: Lengthf32) -> Result<MuMap> {
    let m = magnification(sid, sdd)?;
    if mu.is_empty() || float_eq!(m, 1.0, abs <= 1e-8, rmax <= 1e-5) { return Ok(mu.clone()) }

    let (nr, nc) = mu.dim();
    let (rows, cols) = (ZoomAxis::new(nr, m), ZoomAxis::new(nc, m));
    debug!(m, zoomed_shape = ?(rows.n_zoomed, cols.n_zoomed), "magnifying");
    let view = mu.view();
    Ok(Array2::from_shape_fn((nr, nc), |(i, j)| {
        sample_clamped(&view, rows.source(i), cols.source(j))
    }))
}

/// One axis of a zoom from `n` onto `n_zoomed` pixels, corners onto corners,
/// seen through a centred window of the original `n` pixels.
struct ZoomAxis {
    n: usize,
    n_zoomed: usize,
    step: f32,
}

impl ZoomAxis {

    fn new(n: usize, m: Ratiof32) -> Self {
        // Saturates for absurd M: every pixel then samples the centre
        let n_zoomed = ((n as f32 * m).round() as usize).max(1);
        let step = if n_zoomed > 1 { (n - 1) as f32 / (n_zoomed - 1) as f32 } else { 0.0 };
        Self { n, n_zoomed, step }
    }

    /// Fractional source index of output pixel `i`
    fn source(&self, i: usize) -> f32 {
        source_index(i, self.n_zoomed, self.n) as f32 * self.step
    }
}

/// Centre-crop or edge-pad `a` to `shape`, independently along each axis.
///
/// When the difference along an axis is odd, the extra row/column is
/// cropped from or padded onto the far end (bottom/right).
pub fn fit_to_shape<T: Clone>(a: &Array2<T>, shape: Shape2) -> Array2<T> {
    let (ar, ac) = a.dim();
    Array2::from_shape_fn(shape, |(i, j)| {
        a[[source_index(i, ar, shape.0), source_index(j, ac, shape.1)]].clone()
    })
}

fn source_index(i: usize, n_src: usize, n_out: usize) -> usize {
    if n_src >= n_out {
        i + (n_src - n_out) / 2
    } else {
        let before = (n_out - n_src) / 2;
        i.saturating_sub(before).min(n_src - 1)
    }
}

/// Bilinear sample at fractional `(r, c)`, clamping to the grid edges
fn sample_clamped(a: &ArrayView2<f32>, r: f32, c: f32) -> f32 {
    let (nr, nc) = a.dim();
    let r = r.clamp(0.0, (nr - 1) as f32);
    let c = c.clamp(0.0, (nc - 1) as f32);
    let (r0, c0) = (r.floor() as usize, c.floor() as usize);
    let (r1, c1) = ((r0 + 1).min(nr - 1), (c0 + 1).min(nc - 1));
    let (fr, fc) = (r - r0 as f32, c - c0 as f32);
    a[[r0, c0]] * (1.0 - fr) * (1.0 - fc) +
    a[[r1, c0]] *        fr  * (1.0 - fc) +
    a[[r0, c1]] * (1.0 - fr) *        fc  +
    a[[r1, c1]] *        fr  *        fc
}

#[cfg(test)]
mod test_rotate {
    use super::*;
    use rstest::rstest;
    use proptest::prelude::*;
    use ndarray::array;
    use ndarray_rand::{RandomExt, rand_distr::Uniform};
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    fn random_map(n: Shape2, seed: u64) -> MuMap {
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        Array2::random_using(n, Uniform::new(0.0, 1.0), &mut rng)
    }

    #[rstest]
    #[case(0.0)]
    #[case(360.0)]
    #[case(-360.0)]
    #[case(720.0)]
    fn full_turns_are_exact_identity(#[case] angle: Anglef32) {
        let mu = random_map((17, 23), 1);
        assert_eq!(rotate(&mu, angle), mu);
    }

    proptest! {
        #[test]
        fn rotation_preserves_shape(
            rows  in 1..40_usize,
            cols  in 1..40_usize,
            angle in -400.0..(400.0 as Anglef32),
        ) {
            let mu = random_map((rows, cols), 2);
            prop_assert_eq!(rotate(&mu, angle).dim(), (rows, cols));
        }

        #[test]
        fn rotation_of_uniform_map_is_uniform(angle in 0.0..(360.0 as Anglef32)) {
            let mu = MuMap::from_elem((12, 9), 0.3);
            for v in rotate(&mu, angle).iter() {
                prop_assert!((v - 0.3).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let mut mu = MuMap::zeros((5, 5));
        mu[[0, 2]] = 1.0;
        let rotated = rotate(&mu, 90.0);
        assert!((rotated[[2, 0]] - 1.0).abs() < 1e-5);
        assert!(rotated[[0, 2]].abs() < 1e-5);
    }

    #[test]
    fn out_of_bounds_samples_take_edge_values() {
        // Corners of the rotated grid sample from outside the input: they
        // must be filled from the edges, not with zeros.
        let mu = array![[1.0, 1.0, 1.0],
                        [1.0, 5.0, 1.0],
                        [1.0, 1.0, 1.0]];
        let rotated = rotate(&mu, 45.0);
        assert!((rotated[[0, 0]] - 1.0).abs() < 1e-5);
        assert!((rotated[[2, 2]] - 1.0).abs() < 1e-5);
    }
}
