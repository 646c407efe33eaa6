//! Regions drawn into phantoms, and the layered drawing process.
//!
//! A phantom is an ordered list of `Layer`s rendered onto a `Grid`; later
//! layers overwrite earlier ones wherever they paint. Whether a region exists
//! (and hence its ROI mask) depends only on its `Shape`, never on the layers
//! drawn over it.

use ndarray::Zip;

use crate::grid::{Grid, GridPoint};
use crate::types::{Attenuationf32, Lengthf32, Mask, MuMap, Ratiof32};

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {

    /// Axis-aligned filled ellipse, normalised coordinates
    Ellipse { centre: (Lengthf32, Lengthf32), semi_axes: (Lengthf32, Lengthf32) },

    /// Thin band straddling the boundary of a centred ellipse:
    /// `|x²/a² + y²/b² - 1| < half_width`
    Rim { semi_axes: (Lengthf32, Lengthf32), half_width: Ratiof32 },

    /// `x < x_max`, `y_min < y < y_max`, `y - x > diagonal`
    Wedge { x_max: Lengthf32, y_range: (Lengthf32, Lengthf32), diagonal: Lengthf32 },

    /// Filled circle, normalised coordinates
    Disc { centre: (Lengthf32, Lengthf32), radius: Lengthf32 },

    /// Filled circle in grid units: centre and radius measured in pixels
    PixelDisc { centre: (f32, f32), radius: f32 },

    Union(Vec<Shape>),
}

impl Shape {

    pub fn contains(&self, p: &GridPoint) -> bool {
        use Shape::*;
        let GridPoint { x, y, .. } = *p;
        match self {
            Ellipse { centre: (cx, cy), semi_axes: (a, b) } => {
                let (dx, dy) = ((x - cx) / a, (y - cy) / b);
                dx * dx + dy * dy <= 1.0
            }
            Rim { semi_axes: (a, b), half_width } => {
                let (dx, dy) = (x / a, y / b);
                (dx * dx + dy * dy - 1.0).abs() < *half_width
            }
            Wedge { x_max, y_range: (y_min, y_max), diagonal } => {
                x < *x_max && y > *y_min && y < *y_max && y - x > *diagonal
            }
            Disc { centre: (cx, cy), radius } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= radius * radius
            }
            PixelDisc { centre: (ci, cj), radius } => {
                let (di, dj) = (p.i as f32 - ci, p.j as f32 - cj);
                di * di + dj * dj <= radius * radius
            }
            Union(shapes) => shapes.iter().any(|s| s.contains(p)),
        }
    }

    pub fn mask(&self, grid: &Grid) -> Mask { grid.map(|p| self.contains(&p)) }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layer {

    /// Fill `shape` with `mu` and empty everything outside it. Later
    /// `Paint { within_outline: true, .. }` layers are restricted to `shape`.
    Outline { shape: Shape, mu: Attenuationf32 },

    /// Thickness falloff: multiply by `base + (1 - base)·exp(-rate·r²)`
    Falloff { base: Ratiof32, rate: Ratiof32 },

    /// Overwrite μ inside `shape`
    Paint { shape: Shape, mu: Attenuationf32, within_outline: bool },
}

/// Draw `layers` in order onto an empty `grid`
pub fn render(grid: &Grid, layers: &[Layer]) -> MuMap {
    let mut mu = MuMap::zeros(grid.shape());
    let mut outline = Mask::from_elem(grid.shape(), true);

    for layer in layers {
        match layer {
            Layer::Outline { shape, mu: value } => {
                outline = shape.mask(grid);
                Zip::from(&mut mu).and(&outline).for_each(|v, &inside| {
                    *v = if inside { *value } else { 0.0 }
                });
            }
            Layer::Falloff { base, rate } => {
                for ((i, j), v) in mu.indexed_iter_mut() {
                    let r2 = grid.point((i, j)).r2();
                    *v *= base + (1.0 - base) * (-rate * r2).exp();
                }
            }
            Layer::Paint { shape, mu: value, within_outline } => {
                let region = shape.mask(grid);
                Zip::from(&mut mu).and(&region).and(&outline).for_each(|v, &inside, &in_outline| {
                    if inside && (in_outline || !within_outline) { *v = *value }
                });
            }
        }
    }
    mu
}
