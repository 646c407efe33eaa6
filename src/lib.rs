//! Teaching-grade 2D X-ray radiography simulator.
//!
//! Phantoms (`phantom`) are projected (`projection`) through a rotation and
//! magnification (`geometry`) and a Beer–Lambert attenuation chain
//! (`physics`); ROI statistics (`fom`) summarise the result.

mod exports;
pub use exports::*;

pub mod types;
pub mod error;
pub mod grid;
pub mod geometry;
pub mod physics;
pub mod acquisition;
pub mod phantom;
pub mod projection;
pub mod fom;
pub mod config;
pub mod utils;
pub mod logger;
