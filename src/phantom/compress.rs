//! Compression of a phantom along its rows (axis 0), as in a mammography
//! paddle: the content is squeezed by `factor` with area-preserving
//! resampling, then edge-padded back to the original shape. ROI masks are
//! squeezed the same way and re-binarised at 0.5, so they stay aligned with
//! the compressed μ-map.

use ndarray::Array2;
use tracing::debug;

use super::{Compression, PhantomInfo};
use crate::error::{Result, XrayError};
use crate::geometry::fit_to_shape;
use crate::types::{Mask, MuMap, Ratiof32};

pub fn compress(mu: &MuMap, info: PhantomInfo, factor: Ratiof32) -> Result<(MuMap, PhantomInfo)> {
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(XrayError::InvalidParameter {
            name: "compression_factor", value: factor, reason: "must lie in (0, 1]",
        });
    }
    let shape = mu.dim();
    let rows = ((shape.0 as f32 * factor) as usize).max(1);
    debug!(factor, from = shape.0, to = rows, "compressing phantom");

    let squeeze_mask = |mask: &Mask| {
        let fraction = mask.mapv(|inside| if inside { 1.0 } else { 0.0 });
        let squeezed = area_resample_rows(&fraction, rows).mapv(|f| f > 0.5);
        fit_to_shape(&squeezed, shape)
    };

    let compressed = fit_to_shape(&area_resample_rows(mu, rows), shape);
    let info = PhantomInfo {
        lesion_mask: squeeze_mask(&info.lesion_mask),
        background_mask: squeeze_mask(&info.background_mask),
        compression: Compression::Compressed { factor },
        ..info
    };
    Ok((compressed, info))
}

/// Resample to `rows` rows: each output row is the overlap-weighted mean of
/// the input rows it covers.
fn area_resample_rows(a: &Array2<f32>, rows: usize) -> Array2<f32> {
    let (nr, nc) = a.dim();
    let scale = nr as f64 / rows as f64;
    let mut out = Array2::zeros((rows, nc));
    for (o, mut out_row) in out.rows_mut().into_iter().enumerate() {
        let (lo, hi) = (o as f64 * scale, (o + 1) as f64 * scale);
        let last = (hi.ceil() as usize).min(nr);
        for k in (lo.floor() as usize)..last {
            let overlap = hi.min((k + 1) as f64) - lo.max(k as f64);
            if overlap > 0.0 {
                out_row.scaled_add((overlap / scale) as f32, &a.row(k));
            }
        }
    }
    out
}
