//! Acquisition parameters: the scalars a caller (GUI slider panel, CLI,
//! config file) feeds into every projection.

use serde::Deserialize;
use tracing::warn;

use crate::error::{positive, Result, XrayError};
use crate::types::{Anglef32, Intensityf32, Lengthf32, Ratiof32, Timef32, Voltagef32};

/// Recommended ranges (not enforced) are given per field. Only `kvp`, `sid`
/// and `sdd` are checked, as they appear as divisors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcquisitionParameters {

    /// Projection angle in degrees, 0–180
    pub angle_deg: Anglef32,

    /// Source-to-isocentre distance, 200–1200
    pub sid: Lengthf32,

    /// Source-to-detector distance, 400–1600
    pub sdd: Lengthf32,

    /// Tube voltage in kV (keV-equivalent), 20–120
    pub kvp: Voltagef32,

    /// Exposure time in s, 0.01–3.0
    pub exposure_time: Timef32,

    /// Added filtration in mm of aluminium, 0–10
    pub filtration_mm: Lengthf32,

    /// Fraction of signal transmitted by the anti-scatter grid, 0.65–1.0
    pub grid_ratio: Ratiof32,

    /// Incident intensity
    pub i0: Intensityf32,
}

impl Default for AcquisitionParameters {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            sid: 500.0,
            sdd: 1000.0,
            kvp: 30.0,
            exposure_time: 1.0,
            filtration_mm: 2.0,
            grid_ratio: 1.0,
            i0: 1.0,
        }
    }
}

impl AcquisitionParameters {

    pub fn validate(&self) -> Result<()> {
        positive("kvp", self.kvp)?;
        positive("sid", self.sid)?;
        positive("sdd", self.sdd)?;
        Ok(())
    }

    pub fn at_angle(&self, angle_deg: Anglef32) -> Self { Self { angle_deg, ..*self } }
}

/// Upper bound on the number of rows of one sinogram
pub const MAX_SINOGRAM_ANGLES: usize = 100_000;

/// Angles covered by a sinogram: `0, step, 2·step, … ≤ max_angle`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SinogramRange {
    pub max_angle: Anglef32,
    pub step: Anglef32,
}

impl Default for SinogramRange {
    fn default() -> Self { Self { max_angle: 180.0, step: 1.0 } }
}

impl SinogramRange {

    pub fn new(max_angle: Anglef32, step: Anglef32) -> Self { Self { max_angle, step } }

    /// All angles in ascending order, both ends included when `max_angle` is
    /// a multiple of `step`.
    ///
    /// A zero or negative `max_angle` (a slider at its minimum) yields the
    /// single angle 0 rather than an error.
    pub fn angles(&self) -> Result<Vec<Anglef32>> {
        let step = positive("angle_step", self.step)?;
        if !(self.max_angle > 0.0) {
            warn!(max_angle = self.max_angle, "degenerate sinogram range: using angle 0 only");
            return Ok(vec![0.0]);
        }
        if !self.max_angle.is_finite() {
            return Err(XrayError::InvalidParameter {
                name: "max_angle", value: self.max_angle, reason: "must be finite",
            });
        }
        // Tolerate rounding in max/step, e.g. 0.3 / 0.1
        let n_steps = (self.max_angle as f64 / step as f64 + 1e-6).floor();
        if n_steps >= MAX_SINOGRAM_ANGLES as f64 {
            return Err(XrayError::InvalidParameter {
                name: "max_angle", value: self.max_angle, reason: "too many angles for this step",
            });
        }
        let n_steps = n_steps as usize;
        Ok((0..=n_steps).map(|k| k as f32 * step).collect())
    }
}
