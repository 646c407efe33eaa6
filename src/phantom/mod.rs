//! Synthetic μ-maps for the projection engine.
//!
//! Three kinds of phantom:
//!
//! + geometric: soft tissue with a central bone disc
//!
//! + reference: the Shepp–Logan head phantom, calibrated onto a μ range
//!
//! + anatomical: a layered breast model with lesion, microcalcifications and
//!   a benign mass, returned together with its `PhantomInfo` (ground-truth μ
//!   values and ROI masks), optionally compressed.
//!
//! All builders are deterministic: the only randomness (microcalcification
//! placement) comes from an explicit, seeded generator.

pub mod shapes;
pub mod geometric;
pub mod shepp_logan;
pub mod breast;
pub mod compress;

pub use shapes::{render, Layer, Shape};
pub use shepp_logan::{shepp_logan, ReferenceCalibration};
pub use breast::BreastConfig;
pub use compress::compress;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, XrayError};
use crate::grid::Grid;
use crate::types::{Attenuationf32, Lengthf32, Mask, MuMap, Ratiof32, Shape2};

/// Ground-truth μ of each tissue class
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TissueMu {
    pub adipose: Attenuationf32,
    pub gland: Attenuationf32,
    pub lesion: Attenuationf32,
    pub microcalcification: Attenuationf32,
    pub muscle: Attenuationf32,
    pub skin: Attenuationf32,
    pub soft_tissue: Attenuationf32,
    pub bone: Attenuationf32,
}

impl Default for TissueMu {
    fn default() -> Self {
        Self {
            adipose: 0.22,
            gland: 0.40,
            lesion: 0.75,
            microcalcification: 0.55,
            muscle: 0.50,
            skin: 0.80,
            soft_tissue: 0.02,
            bone: 0.06,
        }
    }
}

impl TissueMu {
    /// Benign mass: halfway between glandular tissue and calcification
    pub fn benign(&self) -> Attenuationf32 { (self.gland + self.microcalcification) * 0.5 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoiLabel {
    Lesion,
    /// Breast outline minus lesion
    Background,
}

impl std::fmt::Display for RoiLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RoiLabel::Lesion     => write!(f, "lesion"),
            RoiLabel::Background => write!(f, "background"),
        }
    }
}

/// Which geometry the ROI masks of a phantom describe
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Compression {
    Native,
    Compressed { factor: Ratiof32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhantomInfo {
    pub tissue: TissueMu,
    pub lesion_mask: Mask,
    pub background_mask: Mask,
    pub compression: Compression,
}

impl PhantomInfo {

    pub fn native(tissue: TissueMu, lesion_mask: Mask, background_mask: Mask) -> Self {
        Self { tissue, lesion_mask, background_mask, compression: Compression::Native }
    }

    pub fn roi(&self, label: RoiLabel) -> &Mask {
        match label {
            RoiLabel::Lesion     => &self.lesion_mask,
            RoiLabel::Background => &self.background_mask,
        }
    }

    pub fn shape(&self) -> Shape2 { self.lesion_mask.dim() }

    pub fn is_compressed(&self) -> bool { matches!(self.compression, Compression::Compressed { .. }) }

    pub fn compression_factor(&self) -> Option<Ratiof32> {
        match self.compression {
            Compression::Native => None,
            Compression::Compressed { factor } => Some(factor),
        }
    }
}

/// Owns the constants that phantoms are built from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhantomBuilder {
    pub tissue: TissueMu,
    pub breast: BreastConfig,
    pub reference: ReferenceCalibration,
}

impl PhantomBuilder {

    pub fn geometric(&self, width: usize, height: usize) -> MuMap {
        geometric::geometric(&Grid::new(width, height), &self.tissue)
    }

    pub fn reference(&self, width: usize, height: usize) -> MuMap {
        shepp_logan::reference(&Grid::new(width, height), &self.reference)
    }

    /// Breast phantom, with microcalcifications placed by a generator seeded
    /// from `self.breast.seed`. `compression` is the compression factor, if
    /// any.
    pub fn anatomical(
        &self,
        width: usize,
        height: usize,
        lesion_radius: Lengthf32,
        compression: Option<Ratiof32>,
    ) -> Result<(MuMap, PhantomInfo)> {
        let mut rng = StdRng::seed_from_u64(self.breast.seed);
        self.anatomical_with_rng(width, height, lesion_radius, compression, &mut rng)
    }

    pub fn anatomical_with_rng<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        lesion_radius: Lengthf32,
        compression: Option<Ratiof32>,
        rng: &mut R,
    ) -> Result<(MuMap, PhantomInfo)> {
        if width == 0 || height == 0 {
            let value = (if width == 0 { width } else { height }) as f32;
            return Err(XrayError::InvalidParameter { name: "size", value, reason: "must be non-zero" });
        }
        let grid = Grid::new(width, height);
        let config = BreastConfig { lesion_radius, ..self.breast.clone() };
        debug!(width, height, lesion_radius, ?compression, "building breast phantom");

        let mu = render(&grid, &breast::layers(&grid, &self.tissue, &config, rng)?);

        let lesion_mask = breast::lesion(&grid, &config).mask(&grid);
        let background_mask = &breast::outline().mask(&grid) & &lesion_mask.mapv(|l| !l);
        let info = PhantomInfo::native(self.tissue, lesion_mask, background_mask);

        match compression {
            None         => Ok((mu, info)),
            Some(factor) => compress(&mu, info, factor),
        }
    }
}

pub fn build_geometric_phantom(width: usize, height: usize) -> MuMap {
    PhantomBuilder::default().geometric(width, height)
}

pub fn build_reference_phantom(width: usize, height: usize) -> MuMap {
    PhantomBuilder::default().reference(width, height)
}

/// `compress_factor` defaults to 0.65 when `compress` is requested, and is
/// ignored otherwise.
pub fn build_anatomical_phantom(
    width: usize,
    height: usize,
    lesion_radius: Lengthf32,
    compress: bool,
    compress_factor: Option<Ratiof32>,
) -> Result<(MuMap, PhantomInfo)> {
    let builder = PhantomBuilder::default();
    let factor = compress.then(|| compress_factor.unwrap_or(builder.breast.compression_factor));
    builder.anatomical(width, height, lesion_radius, factor)
}
