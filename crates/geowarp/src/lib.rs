//! Geometric image warping.
//!
//! Build a coordinate map with one of the generators in [`imgproc::warp`] and
//! resample an image through it with [`imgproc::interpolation::remap`].
//!
//! ```
//! use geowarp::image::Image;
//! use geowarp::imgproc::interpolation::{remap, BorderMode, InterpolationMode};
//! use geowarp::imgproc::warp::generate_rotation_scale_map;
//!
//! let src = Image::<u8, 3>::from_size_val([64, 48].into(), 128).unwrap();
//! let map = generate_rotation_scale_map(src.size(), 45.0, [1.0, 1.0]).unwrap();
//! let dst = remap(&src, &map, InterpolationMode::Bilinear, BorderMode::Constant, 0.0).unwrap();
//! assert_eq!(dst.size(), map.size());
//! ```

#[doc(inline)]
pub use geowarp_tensor as tensor;

#[doc(inline)]
pub use geowarp_image as image;

#[doc(inline)]
pub use geowarp_linalg as linalg;

#[doc(inline)]
pub use geowarp_imgproc as imgproc;
