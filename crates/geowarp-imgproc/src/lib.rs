#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The crate is split along the data flow of a warp: a generator in [`warp`]
//! produces a [`interpolation::CoordinateMap`], and [`interpolation::remap`]
//! resamples a source image through any such map. The resampler never needs
//! to know which generator built the map.
//!
//! ```
//! use geowarp_image::Image;
//! use geowarp_imgproc::interpolation::{remap, BorderMode, InterpolationMode};
//! use geowarp_imgproc::warp::generate_rotation_scale_map;
//!
//! let src = Image::<f32, 1>::from_size_fn([4, 4].into(), |x, y, _| (y * 4 + x) as f32).unwrap();
//! let map = generate_rotation_scale_map(src.size(), 0.0, [2.0, 1.0]).unwrap();
//! let dst = remap(&src, &map, InterpolationMode::Nearest, BorderMode::Constant, 0.0).unwrap();
//! assert_eq!(dst.width(), 8);
//! assert_eq!(dst.height(), 4);
//! ```

/// Error types for the warping operations.
pub mod error;

/// Interpolation kernels, border policies, coordinate maps and the remap operation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// Coordinate map generators: analytic rotation/scale and control-point polynomials.
pub mod warp;

pub use error::WarpError;
