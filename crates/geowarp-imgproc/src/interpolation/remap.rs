use geowarp_image::{Image, ImageDtype};

use super::border::BorderMode;
use super::grid::CoordinateMap;
use super::interpolate::{interpolate_pixel, InterpolationMode};
use crate::error::WarpError;
use crate::parallel;

/// Resampling options for [`remap_with`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemapParams {
    /// The resampling kernel.
    pub interpolation: InterpolationMode,
    /// The out-of-bounds policy.
    pub border_mode: BorderMode,
    /// The sample used by [`BorderMode::Constant`].
    pub border_value: f32,
}

/// Apply a generic geometric transformation to an image.
///
/// Every destination pixel `(r, c)` samples `src` at `(map_x[r, c], map_y[r, c])`;
/// each channel is sampled independently with the shared map. The destination
/// has the map's size and is freshly allocated.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `map` - The source location of every destination pixel.
/// * `interpolation` - The interpolation mode to use.
/// * `border_mode` - How samples outside `src` are produced.
/// * `border_value` - The sample used by [`BorderMode::Constant`].
///
/// # Errors
///
/// Returns [`WarpError::InvalidParameter`] if `src` has no pixels.
///
/// # Example
///
/// ```
/// use geowarp_image::Image;
/// use geowarp_imgproc::interpolation::{remap, BorderMode, CoordinateMap, InterpolationMode};
///
/// let src = Image::<f32, 1>::from_size_fn([3, 3].into(), |x, y, _| (y * 3 + x) as f32).unwrap();
/// // shift one column to the left
/// let map = CoordinateMap::from_fn(src.size(), |c, r| (c as f32 - 1.0, r as f32)).unwrap();
/// let dst = remap(&src, &map, InterpolationMode::Nearest, BorderMode::Constant, 9.0).unwrap();
/// assert_eq!(dst.as_slice(), &[9.0, 0.0, 1.0, 9.0, 3.0, 4.0, 9.0, 6.0, 7.0]);
/// ```
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    map: &CoordinateMap,
    interpolation: InterpolationMode,
    border_mode: BorderMode,
    border_value: f32,
) -> Result<Image<T, C>, WarpError> {
    if src.size().is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "cannot resample an empty source image ({})",
            src.size()
        )));
    }

    let mut dst = Image::from_size_val(map.size(), T::default())?;

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(&mut dst, map.map_x(), map.map_y(), |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, border_mode, border_value);
        dst_pixel
            .iter_mut()
            .zip(pixel)
            .for_each(|(d, p)| *d = T::from_f32(p));
    });

    log::debug!(
        "remap {} -> {} ({:?}, {:?})",
        src.size(),
        dst.size(),
        interpolation,
        border_mode
    );

    Ok(dst)
}

/// [`remap`] with the options bundled in a [`RemapParams`].
pub fn remap_with<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    map: &CoordinateMap,
    params: &RemapParams,
) -> Result<Image<T, C>, WarpError> {
    remap(
        src,
        map,
        params.interpolation,
        params.border_mode,
        params.border_value,
    )
}
