//! Anatomically-inspired 2D breast phantom.
//!
//! Drawn as layers, in order: breast outline (adipose), thickness falloff,
//! skin rim, pectoral wedge, glandular tissue, lesion, microcalcifications,
//! benign mass.

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::Deserialize;

use super::shapes::{Layer, Shape};
use super::TissueMu;
use crate::error::{Result, XrayError};
use crate::grid::Grid;
use crate::types::{Lengthf32, Ratiof32};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BreastConfig {

    /// Lesion radius in grid units
    pub lesion_radius: f32,

    /// Offset of the lesion centre from the grid centre, along the columns,
    /// in grid units
    pub lesion_offset: f32,

    /// Number of microcalcification spots
    pub calcifications: usize,

    /// Seed of the generator placing the microcalcifications
    pub seed: u64,

    /// Mean spot position, normalised coordinates
    pub calcification_mean: (Lengthf32, Lengthf32),

    /// Standard deviation of spot positions, normalised coordinates
    pub calcification_spread: Lengthf32,

    /// Range of spot radii, normalised coordinates
    pub calcification_radius: (Lengthf32, Lengthf32),

    /// Default compression factor when compression is requested
    pub compression_factor: Ratiof32,
}

impl Default for BreastConfig {
    fn default() -> Self {
        Self {
            lesion_radius: 25.0,
            lesion_offset: 25.0,
            calcifications: 7,
            seed: 42,
            calcification_mean: (-0.1, 0.1),
            calcification_spread: 0.18,
            calcification_radius: (0.015, 0.04),
            compression_factor: 0.65,
        }
    }
}

pub fn outline() -> Shape {
    Shape::Ellipse { centre: (0.0, 0.0), semi_axes: (0.9, 1.0) }
}

pub fn lesion(grid: &Grid, config: &BreastConfig) -> Shape {
    let (ci, cj) = grid.centre_index();
    Shape::PixelDisc {
        centre: (ci as f32, cj as f32 + config.lesion_offset),
        radius: config.lesion_radius,
    }
}

fn skin() -> Shape { Shape::Rim { semi_axes: (0.92, 1.02), half_width: 0.03 } }

fn pectoral_muscle() -> Shape {
    Shape::Wedge { x_max: -0.55, y_range: (-0.2, 0.9), diagonal: -0.7 }
}

fn glandular_tissue() -> Shape {
    Shape::Union(vec![
        Shape::Ellipse { centre: (-0.15,  0.0 ), semi_axes: (0.55, 0.6) },
        Shape::Ellipse { centre: (-0.05, -0.15), semi_axes: (0.45, 0.5) },
    ])
}

fn benign_mass() -> Shape {
    Shape::Ellipse { centre: (-0.35, 0.25), semi_axes: (0.12, 0.08) }
}

fn microcalcifications<R: Rng + ?Sized>(config: &BreastConfig, rng: &mut R) -> Result<Vec<Shape>> {
    let spread = config.calcification_spread;
    let invalid_spread = || XrayError::InvalidParameter {
        name: "calcification_spread", value: spread, reason: "must be finite and non-negative",
    };
    if !(spread.is_finite() && spread >= 0.0) { return Err(invalid_spread()) }
    let position = Normal::new(0.0, spread).map_err(|_| invalid_spread())?;
    let (lo, hi) = config.calcification_radius;
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return Err(XrayError::InvalidParameter {
            name: "calcification_radius", value: hi, reason: "range must be finite and ordered",
        });
    }
    let radius = Uniform::new_inclusive(lo, hi);
    let (mx, my) = config.calcification_mean;

    // All centres are drawn before any radius
    let centres: Vec<_> = (0..config.calcifications)
        .map(|_| (mx + position.sample(rng), my + position.sample(rng)))
        .collect();
    Ok(centres.into_iter()
       .map(|centre| Shape::Disc { centre, radius: radius.sample(rng) })
       .collect())
}

pub fn layers<R: Rng + ?Sized>(
    grid: &Grid,
    tissue: &TissueMu,
    config: &BreastConfig,
    rng: &mut R,
) -> Result<Vec<Layer>> {
    use Layer::*;
    let mut layers = vec![
        Outline { shape: outline(), mu: tissue.adipose },
        Falloff { base: 0.8, rate: 3.0 },
        Paint { shape: skin()              , mu: tissue.skin  , within_outline: false },
        Paint { shape: pectoral_muscle()   , mu: tissue.muscle, within_outline: false },
        Paint { shape: glandular_tissue()  , mu: tissue.gland , within_outline: true  },
        Paint { shape: lesion(grid, config), mu: tissue.lesion, within_outline: false },
    ];
    layers.extend(
        microcalcifications(config, rng)?.into_iter()
            .map(|shape| Paint { shape, mu: tissue.microcalcification, within_outline: true })
    );
    layers.push(Paint { shape: benign_mass(), mu: tissue.benign(), within_outline: true });
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::shapes::render;
    use rand::{rngs::StdRng, SeedableRng};

    fn no_spots() -> BreastConfig { BreastConfig { calcifications: 0, ..BreastConfig::default() } }

    fn draw(config: &BreastConfig, seed: u64) -> crate::types::MuMap {
        let grid = Grid::new(256, 256);
        let mut rng = StdRng::seed_from_u64(seed);
        render(&grid, &layers(&grid, &TissueMu::default(), config, &mut rng).unwrap())
    }

    #[test]
    fn tissue_classes_land_where_expected() {
        let t = TissueMu::default();
        let mu = draw(&no_spots(), 42);
        assert_eq!(mu[[128, 153]], t.lesion);             // lesion centre
        assert_eq!(mu[[245, 128]], t.skin);               // x ≈ 0.92
        assert_eq!(mu[[ 10, 170]], t.muscle);             // pectoral wedge
        assert_eq!(mu[[  0,   0]], 0.0);                  // outside the breast
        assert_eq!(mu[[ 83, 160]], t.benign());           // x ≈ -0.35, y ≈ 0.25
        assert_eq!(mu[[100, 100]], t.gland);
    }

    #[test]
    fn adipose_is_thinned_towards_the_edge() {
        let t = TissueMu::default();
        let mu = draw(&no_spots(), 42);
        // x ≈ 0.7, y = 0: outside the glands, inside the outline
        let v = mu[[217, 128]];
        assert!(v < t.adipose && v > 0.8 * t.adipose, "{v}");
    }

    #[test]
    fn microcalcifications_are_seeded() {
        let a = draw(&BreastConfig::default(), 42);
        let b = draw(&BreastConfig::default(), 42);
        assert_eq!(a, b);
        let c = draw(&BreastConfig::default(), 43);
        assert_ne!(a, c);
        let spots = a.iter().filter(|&&v| v == TissueMu::default().microcalcification).count();
        assert!(spots > 0);
    }

    #[test]
    fn invalid_spot_parameters_are_rejected() {
        let grid = Grid::new(32, 32);
        let mut rng = StdRng::seed_from_u64(0);
        for spread in [-1.0, -1e-6, f32::NAN, f32::INFINITY] {
            let bad_spread = BreastConfig { calcification_spread: spread, ..BreastConfig::default() };
            match layers(&grid, &TissueMu::default(), &bad_spread, &mut rng) {
                Err(XrayError::InvalidParameter { name, .. }) => assert_eq!(name, "calcification_spread"),
                other => panic!("spread {spread} accepted: {other:?}"),
            }
        }
        let no_spread = BreastConfig { calcification_spread: 0.0, ..BreastConfig::default() };
        assert!(layers(&grid, &TissueMu::default(), &no_spread, &mut rng).is_ok());
        let bad_radius = BreastConfig { calcification_radius: (0.05, 0.01), ..BreastConfig::default() };
        assert!(layers(&grid, &TissueMu::default(), &bad_radius, &mut rng).is_err());
    }
}
