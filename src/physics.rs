//! Beer–Lambert attenuation with empirical corrections.
//!
//! The chain, applied to a non-negative path integral `P` of μ:
//!
//! 1. energy scaling: `P · (kVp_ref / kVp)`
//!
//! 2. filtration: `+ t_Al · μ_Al · (kVp_ref / kVp)`
//!
//! 3. Beer–Lambert: `I0 · exp(-P)`
//!
//! 4. exposure: `· t / t_ref`
//!
//! 5. anti-scatter grid: `· grid_ratio`
//!
//! None of these clip: callers that want a displayable image use
//! `attenuate_clipped` or `clip_unit`. All functions are generic over array
//! dimension, so the same chain serves profiles, radiographs and sinograms.

use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::Deserialize;

use crate::acquisition::AcquisitionParameters;
use crate::error::{positive, Result};
use crate::types::{Attenuationf32, Intensityf32, Lengthf32, Ratiof32, Timef32, Voltagef32};

/// Constants of the toy attenuation model
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PhysicsConfig {

    /// Beam energy at which μ values are quoted
    pub reference_kvp: Voltagef32,

    /// Exposure time giving unit brightness
    pub reference_time: Timef32,

    /// Attenuation of 1 mm of aluminium filter at `reference_kvp`
    pub mu_al_reference: Attenuationf32,

    /// Cumulative path lengths in radiographs are divided by this
    pub radiograph_thickness_scale: Lengthf32,

    /// Path integrals in profiles and sinograms are divided by this
    pub profile_thickness_scale: Lengthf32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            reference_kvp: 30.0,
            reference_time: 1.0,
            mu_al_reference: 0.15,
            radiograph_thickness_scale: 50.0,
            profile_thickness_scale: 1.0,
        }
    }
}

/// Higher kVp ⇒ lower effective attenuation
pub fn energy_scale<S, D>(path: &ArrayBase<S, D>, kvp: Voltagef32, config: &PhysicsConfig) -> Result<Array<f32, D>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let kvp = positive("kvp", kvp)?;
    let scale = config.reference_kvp / kvp;
    Ok(path.mapv(|p| p * scale))
}

/// Add the attenuation of an equivalent aluminium filter in front of
/// everything. The filter is slightly less effective at higher kVp.
pub fn filtration<S, D>(
    path: &ArrayBase<S, D>,
    filtration_mm: Lengthf32,
    kvp: Voltagef32,
    config: &PhysicsConfig,
) -> Result<Array<f32, D>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let kvp = positive("kvp", kvp)?;
    let mu_al = config.mu_al_reference * (config.reference_kvp / kvp);
    let extra = filtration_mm * mu_al;
    Ok(path.mapv(|p| p + extra))
}

pub fn beer_lambert<S, D>(path: &ArrayBase<S, D>, i0: Intensityf32) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    path.mapv(|p| i0 * (-p).exp())
}

/// Brightness is proportional to exposure time
pub fn exposure<S, D>(intensity: &ArrayBase<S, D>, exposure_time: Timef32, config: &PhysicsConfig) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let factor = exposure_time / config.reference_time;
    intensity.mapv(|i| i * factor)
}

/// The grid removes the same fraction of primary and scattered signal
pub fn grid<S, D>(intensity: &ArrayBase<S, D>, grid_ratio: Ratiof32) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    intensity.mapv(|i| i * grid_ratio)
}

pub fn clip_unit<S, D>(intensity: &ArrayBase<S, D>) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    intensity.mapv(|i| i.clamp(0.0, 1.0))
}

/// The full chain, from path integral to (unclipped) detected intensity
pub fn attenuate<S, D>(path: &ArrayBase<S, D>, params: &AcquisitionParameters, config: &PhysicsConfig) -> Result<Array<f32, D>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let path      = energy_scale(path, params.kvp, config)?;
    let path      = filtration(&path, params.filtration_mm, params.kvp, config)?;
    let intensity = beer_lambert(&path, params.i0);
    let intensity = exposure(&intensity, params.exposure_time, config);
    Ok(grid(&intensity, params.grid_ratio))
}

/// `attenuate` followed by clipping to `[0, 1]`
pub fn attenuate_clipped<S, D>(path: &ArrayBase<S, D>, params: &AcquisitionParameters, config: &PhysicsConfig) -> Result<Array<f32, D>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    attenuate(path, params, config).map(|i| clip_unit(&i))
}
