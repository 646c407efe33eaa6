pub use units::uom::si::Quantity;

pub use crate::types::{
    Anglef32, Attenuationf32, Image, Intensityf32, Lengthf32, Mask, MuMap, Profile,
    Ratiof32, Shape2, Timef32, Voltagef32, DEFAULT_SIZE,
};

pub use crate::error::{Result, XrayError};
pub use crate::acquisition::{AcquisitionParameters, SinogramRange};
pub use crate::physics::PhysicsConfig;
pub use crate::phantom::{
    build_anatomical_phantom, build_geometric_phantom, build_reference_phantom,
    Compression, PhantomBuilder, PhantomInfo, RoiLabel, TissueMu,
};
pub use crate::projection::{profile, radiograph, sinogram, Projector};
pub use crate::fom::{roi_contrast, roi_mean_std, RoiReport, RoiStats};
