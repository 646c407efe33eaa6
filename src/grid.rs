/// The pixel grid on which phantoms are drawn, and its normalised coordinate
/// system.
///
/// Row coordinate `x` and column coordinate `y` each run from -1 to +1
/// inclusive, so the first and last pixel centres lie exactly on the edges
/// of the unit square. Shapes in normalised coordinates therefore stretch
/// with the grid; shapes in grid units (pixel indices) do not.

use ndarray::Array2;

use crate::types::{Lengthf32, Shape2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub n: Shape2,
}

/// A single pixel: its indices and its normalised coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    pub i: usize,
    pub j: usize,
    pub x: Lengthf32,
    pub y: Lengthf32,
}

impl GridPoint {
    /// Squared distance from the centre, in normalised coordinates
    pub fn r2(&self) -> Lengthf32 { self.x * self.x + self.y * self.y }
}

impl Grid {

    pub fn new(width: usize, height: usize) -> Self { Self { n: (height, width) } }

    pub fn shape (&self) -> Shape2 { self.n }
    pub fn width (&self) -> usize  { self.n.1 }
    pub fn height(&self) -> usize  { self.n.0 }

    /// Index of the central pixel, rounding down on even axes
    pub fn centre_index(&self) -> (usize, usize) { (self.n.0 / 2, self.n.1 / 2) }

    pub fn point(&self, (i, j): (usize, usize)) -> GridPoint {
        GridPoint { i, j, x: linspace_at(i, self.n.0), y: linspace_at(j, self.n.1) }
    }

    /// Evaluate `f` at every pixel
    pub fn map<T>(&self, f: impl Fn(GridPoint) -> T) -> Array2<T> {
        Array2::from_shape_fn(self.n, |ij| f(self.point(ij)))
    }
}

/// Value at index `i` of `linspace(-1, 1, n)`
fn linspace_at(i: usize, n: usize) -> Lengthf32 {
    if n < 2 { return -1.0 }
    -1.0 + 2.0 * i as Lengthf32 / (n - 1) as Lengthf32
}

#[cfg(test)]
mod test_grid {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;

    #[rstest]
    #[case(5, 0, -1.0)]
    #[case(5, 1, -0.5)]
    #[case(5, 2,  0.0)]
    #[case(5, 4,  1.0)]
    #[case(3, 1,  0.0)]
    #[case(1, 0, -1.0)]
    fn normalised_coordinates(#[case] n: usize, #[case] i: usize, #[case] expected: Lengthf32) {
        assert_float_eq!(linspace_at(i, n), expected, abs <= 1e-7);
    }

    #[test]
    fn width_is_columns_height_is_rows() {
        let grid = Grid::new(7, 3);
        assert_eq!(grid.shape(), (3, 7));
        assert_eq!(grid.map(|p| p.i + p.j).dim(), (3, 7));
        let corner = grid.point((2, 6));
        assert_float_eq!((corner.x, corner.y), (1.0, 1.0), abs <= (1e-7, 1e-7));
    }

    #[test]
    fn centre_of_even_grid_rounds_down() {
        assert_eq!(Grid::new(256, 256).centre_index(), (128, 128));
        assert_eq!(Grid::new(5, 4).centre_index(), (2, 2));
    }
}
