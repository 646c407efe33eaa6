use ndarray::{Array1, Array2};

pub use units::todo::{
    Anglef32, Attenuationf32, Intensityf32, Lengthf32, Ratiof32, Timef32, Voltagef32,
};

/// Grid of attenuation coefficients, indexed `[row, column]`.
///
/// Rows (axis 0) run along the ray direction, columns (axis 1) are detector
/// positions.
pub type MuMap = Array2<Attenuationf32>;

/// Labelled region of interest over a `MuMap` of the same shape
pub type Mask = Array2<bool>;

pub type Image   = Array2<Intensityf32>;
pub type Profile = Array1<Intensityf32>;

/// `(rows, columns)`, i.e. `(height, width)`
pub type Shape2 = (usize, usize);

pub const DEFAULT_SIZE: usize = 256;
