//! Uniform soft tissue with a central bone disc.

use super::{shapes::Shape, TissueMu};
use crate::grid::Grid;
use crate::types::MuMap;

pub fn geometric(grid: &Grid, tissue: &TissueMu) -> MuMap {
    let (ci, cj) = grid.centre_index();
    let bone = Shape::PixelDisc {
        centre: (ci as f32, cj as f32),
        radius: grid.width() as f32 / 5.0,
    };
    grid.map(|p| if bone.contains(&p) { tissue.bone } else { tissue.soft_tissue })
}
