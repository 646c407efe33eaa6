//! Figures of merit measured over ROI masks.

use std::fmt;

use crate::error::{same_shape, Result, XrayError};
use crate::phantom::{PhantomInfo, RoiLabel};
use crate::types::{Intensityf32, Mask, Ratiof32};

/// Values of `image` where `mask` is set, in row-major order
pub fn values_inside_roi(image: &ndarray::Array2<f32>, mask: &Mask) -> Result<Vec<f32>> {
    same_shape(mask.dim(), image.dim())?;
    Ok(image.iter().zip(mask)
       .filter_map(|(&v, &inside)| inside.then_some(v))
       .collect())
}

/// Mean and population standard deviation of `image` inside `mask`
pub fn roi_mean_std(image: &ndarray::Array2<f32>, mask: &Mask) -> Result<(Intensityf32, Intensityf32)> {
    let values = values_inside_roi(image, mask)?;
    if values.is_empty() { return Err(XrayError::EmptyRoi) }
    // Accumulate in f64: ROIs can hold tens of thousands of pixels
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var  = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
    Ok((mean as f32, var.sqrt() as f32))
}

/// `|signal - background| / |background|`
pub fn roi_contrast(signal_mean: Intensityf32, background_mean: Intensityf32) -> Result<Ratiof32> {
    if background_mean == 0.0 || !background_mean.is_finite() {
        return Err(XrayError::InvalidParameter {
            name: "background_mean", value: background_mean, reason: "must be finite and non-zero",
        });
    }
    Ok((signal_mean - background_mean).abs() / background_mean.abs())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiStats {
    pub mean: Intensityf32,
    pub std: Intensityf32,
}

impl RoiStats {
    pub fn measure(image: &ndarray::Array2<f32>, mask: &Mask) -> Result<Self> {
        let (mean, std) = roi_mean_std(image, mask)?;
        Ok(Self { mean, std })
    }
}

impl fmt::Display for RoiStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4} ± {:.4}", self.mean, self.std)
    }
}

/// Lesion and background statistics of one image, and their contrast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiReport {
    pub lesion: RoiStats,
    pub background: RoiStats,
    pub contrast: Ratiof32,
}

impl RoiReport {
    /// `image` must have the geometry (native or compressed) of the phantom
    /// that `info` describes.
    pub fn measure(image: &ndarray::Array2<f32>, info: &PhantomInfo) -> Result<Self> {
        let lesion     = RoiStats::measure(image, info.roi(RoiLabel::Lesion))?;
        let background = RoiStats::measure(image, info.roi(RoiLabel::Background))?;
        let contrast   = roi_contrast(lesion.mean, background.mean)?;
        Ok(Self { lesion, background, contrast })
    }
}

impl fmt::Display for RoiReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:>12}: {}", RoiLabel::Lesion    , self.lesion)?;
        writeln!(f, "{:>12}: {}", RoiLabel::Background, self.background)?;
        write!  (f, "{:>12}: {:.4}", "contrast", self.contrast)
    }
}

#[cfg(test)]
mod test_roi_stats {
    use super::*;
    use float_eq::assert_float_eq;
    use ndarray::{array, Array2};
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;
    use rstest::rstest;

    #[test]
    fn whole_image_mask_gives_global_statistics() {
        let mut rng = Isaac64Rng::seed_from_u64(7);
        let image = Array2::random_using((40, 30), Uniform::new(0.0, 1.0), &mut rng);
        let mask = Mask::from_elem(image.dim(), true);
        let (mean, std) = roi_mean_std(&image, &mask).unwrap();
        assert_float_eq!(mean, image.mean().unwrap(), rmax <= 1e-5);
        assert_float_eq!(std , image.std(0.0)       , rmax <= 1e-4);
    }

    #[test]
    fn only_selected_pixels_count() {
        let image = array![[1.0, 2.0],
                           [3.0, 9.0]];
        let mask  = array![[true , false],
                           [true , false]];
        let (mean, std) = roi_mean_std(&image, &mask).unwrap();
        assert_float_eq!(mean, 2.0, abs <= 1e-7);
        assert_float_eq!(std , 1.0, abs <= 1e-7);
        assert_eq!(values_inside_roi(&image, &mask).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn empty_mask_is_an_error() {
        let image = Array2::<f32>::ones((3, 3));
        let mask  = Mask::from_elem((3, 3), false);
        assert!(matches!(roi_mean_std(&image, &mask), Err(XrayError::EmptyRoi)));
    }

    #[test]
    fn mismatched_mask_is_an_error() {
        let image = Array2::<f32>::ones((3, 3));
        let mask  = Mask::from_elem((3, 4), true);
        match roi_mean_std(&image, &mask) {
            Err(XrayError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, (3, 4));
                assert_eq!(found   , (3, 3));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[rstest]
    #[case(0.75, 0.25, 2.0)]
    #[case(0.25, 0.75, 2.0 / 3.0)]
    #[case(0.5 , 0.5 , 0.0)]
    #[case(1.0 , -2.0, 1.5)]
    fn contrast(#[case] signal: f32, #[case] background: f32, #[case] expected: f32) {
        assert_float_eq!(roi_contrast(signal, background).unwrap(), expected, rmax <= 1e-6);
    }

    #[rstest]
    #[case(0.0)]
    #[case(f32::NAN)]
    fn degenerate_background_is_rejected(#[case] background: f32) {
        assert!(roi_contrast(0.5, background).is_err());
    }
}
