use geowarp_image::{Image, ImageDtype};

use super::border::BorderMode;
use super::interpolate::accumulate;

/// Kernel for bilinear interpolation
///
/// Blends the 2x2 neighbourhood around `(u, v)` by its fractional offsets.
/// Neighbours outside the image are produced by `border`.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
    border_value: f32,
) -> [f32; C] {
    let (u0, v0) = (u.floor(), v.floor());

    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let iu0 = u0 as isize;
    let iv0 = v0 as isize;
    let iu1 = iu0.saturating_add(1);
    let iv1 = iv0.saturating_add(1);

    let mut pixel = [0.0; C];
    for (pos, w) in [
        ((iu0, iv0), frac_uu * frac_vv),
        ((iu1, iv0), frac_u * frac_vv),
        ((iu0, iv1), frac_uu * frac_v),
        ((iu1, iv1), frac_u * frac_v),
    ] {
        accumulate(&mut pixel, image, pos, w, border, border_value);
    }

    pixel
}
