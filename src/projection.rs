//! Forward projection of μ-maps into observed intensities.
//!
//! Every mode starts with the same geometry: rotate by the acquisition
//! angle, then magnify by `SDD / SID`. Rays run along axis 0.
//!
//! + profile: plain sum along the rays, one intensity per detector column
//!
//! + radiograph: cumulative sum along the rays, so that each pixel sees the
//!   path length traversed so far, divided by
//!   `PhysicsConfig::radiograph_thickness_scale`; clipped to `[0, 1]`
//!
//! + sinogram: clipped profiles over a range of angles, one row per angle
//!
//! Profile and radiograph path lengths are deliberately normalised
//! differently, and are not expected to agree.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    pub physics: PhysicsConfig,
}

impl Default for Projector {
    fn default() -> Self { Self::new(PhysicsConfig::default()) }
}

impl Projector {

    pub fn new(physics: PhysicsConfig) -> Self { Self { physics } }

    /// Rotated and magnified copy of `mu`, ready for summing along axis 0
    fn transform(&self, mu: &MuMap, params: &AcquisitionParameters) -> Result<MuMap> {
        params.validate()?;
        let rotated = rotate(mu, params.angle_deg);
        magnify(&rotated, params.sid, params.sdd)
    }

    /// Total μ along each ray, before any physics
    pub fn path_integral(&self, mu: &MuMap, params: &AcquisitionParameters) -> Result<Profile> {
        let scale = positive("profile_thickness_scale", self.physics.profile_thickness_scale)?;
        let transformed = self.transform(mu, params)?;
        Ok(transformed.sum_axis(Axis(0)) / scale)
    }

    /// Un-clipped intensity per detector column
    pub fn profile(&self, mu: &MuMap, params: &AcquisitionParameters) -> Result<Profile> {
        attenuate(&self.path_integral(mu, params)?, params, &self.physics)
    }

    /// Intensity image with the shape of `mu`, clipped to `[0, 1]`
    pub fn radiograph(&self, mu: &MuMap, params: &AcquisitionParameters) -> Result<Image> {
        let scale = positive("radiograph_thickness_scale", self.physics.radiograph_thickness_scale)?;
        let mut path = self.transform(mu, params)?;
        path.accumulate_axis_inplace(Axis(0), |&before, here| *here += before);
        path /= scale;
        attenuate_clipped(&path, params, &self.physics)
    }

    /// Clipped profiles at every angle of `range`, stacked in ascending
    /// angle order. `params.angle_deg` is ignored.
    ///
    /// Returns the sinogram, shape `(angles.len(), width)`, and the angles.
    pub fn sinogram(
        &self,
        mu: &MuMap,
        range: &SinogramRange,
        params: &AcquisitionParameters,
    ) -> Result<(Image, Vec<Anglef32>)> {
        params.validate()?;
        let angles = range.angles()?;
        debug!(n_angles = angles.len(), step = range.step, "computing sinogram");

        let one_row = |&angle: &Anglef32| {
            trace!(angle, "projecting");
            self.profile(mu, &params.at_angle(angle)).map(|p| clip_unit(&p))
        };

        // Collecting an indexed iterator keeps rows in angle order
        #[cfg    (feature = "serial") ] let rows = angles.    iter().map(one_row).collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "serial"))] let rows = angles.par_iter().map(one_row).collect::<Result<Vec<_>>>()?;

        let mut sinogram = Image::zeros((angles.len(), mu.ncols()));
        for (mut row, profile) in sinogram.rows_mut().into_iter().zip(&rows) {
            row.assign(profile);
        }
        Ok((sinogram, angles))
    }
}

/// `Projector::profile` with the default physics constants
pub fn profile(mu: &MuMap, params: &AcquisitionParameters) -> Result<Profile> {
    Projector::default().profile(mu, params)
}

/// `Projector::radiograph` with the default physics constants
pub fn radiograph(mu: &MuMap, params: &AcquisitionParameters) -> Result<Image> {
    Projector::default().radiograph(mu, params)
}

/// `Projector::sinogram` with the default physics constants
pub fn sinogram(
    mu: &MuMap,
    max_angle: Anglef32,
    angle_step: Anglef32,
    params: &AcquisitionParameters,
) -> Result<(Image, Vec<Anglef32>)> {
    Projector::default().sinogram(mu, &SinogramRange::new(max_angle, angle_step), params)
}

// ----- Imports ------------------------------------------------------------------------------------------
#[cfg(not(feature = "serial"))]
use rayon::prelude::*;
use ndarray::Axis;
use tracing::{debug, trace};

use crate::{
    acquisition::{AcquisitionParameters, SinogramRange},
    error::{positive, Result},
    geometry::{magnify, rotate},
    physics::{attenuate, attenuate_clipped, clip_unit, PhysicsConfig},
    types::{Anglef32, Image, MuMap, Profile},
};
