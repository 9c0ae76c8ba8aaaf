//! Pixel interpolation and border handling for geometric transformations.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Linear blend of the 2x2 neighbourhood
//! - **Bicubic**: Cubic convolution over the 4x4 neighbourhood
//!
//! # Border Modes
//!
//! Samples that fall outside the source are produced by a [`BorderMode`]:
//! a constant value, edge replication, mirroring or wrap-around.

mod bicubic;
mod bilinear;
mod border;

/// Coordinate maps consumed by [`remap`].
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use border::BorderMode;
pub use grid::CoordinateMap;
pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use remap::{remap, remap_with, RemapParams};
