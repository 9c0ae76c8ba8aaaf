use geowarp_image::{Image, ImageDtype};

use super::border::BorderMode;
use super::interpolate::source_pixel;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The policy for positions outside the image.
/// * `border_value` - The constant border sample.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
    border_value: f32,
) -> [f32; C] {
    let iu = u.round() as isize;
    let iv = v.round() as isize;

    let mut pixel = [border_value; C];
    if let Some(src) = source_pixel(image, iu, iv, border) {
        pixel
            .iter_mut()
            .zip(src)
            .for_each(|(p, &s)| *p = s.to_f32());
    }

    pixel
}
