use geowarp_image::{Image, ImageDtype};

use super::border::BorderMode;
use super::interpolate::accumulate;

/// Free parameter of the Keys cubic convolution kernel (OpenCV's choice).
const CUBIC_A: f32 = -0.75;

/// Weights of the four taps at offsets -1, 0, 1, 2 for a fractional position `t`.
#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let w2 = ((a + 2.0) * (1.0 - t) - (a + 3.0)) * (1.0 - t) * (1.0 - t) + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Kernel for bicubic interpolation over the 4x4 neighbourhood of `(u, v)`.
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
    border_value: f32,
) -> [f32; C] {
    let (u0, v0) = (u.floor(), v.floor());
    let wu = cubic_weights(u - u0);
    let wv = cubic_weights(v - v0);
    let (iu0, iv0) = (u0 as isize, v0 as isize);

    let mut pixel = [0.0; C];
    for (j, wy) in wv.iter().enumerate() {
        let iv = iv0.saturating_add(j as isize - 1);
        for (i, wx) in wu.iter().enumerate() {
            let iu = iu0.saturating_add(i as isize - 1);
            accumulate(&mut pixel, image, (iu, iv), wx * wy, border, border_value);
        }
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geowarp_image::ImageError;

    #[test]
    fn weights_partition_unity() {
        for t in [0.0, 0.1, 0.5, 0.9] {
            let w = cubic_weights(t);
            assert_relative_eq!(w.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        }
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn half_pixel_linear_ramp() -> Result<(), ImageError> {
        // at half-pixel offsets the taps are symmetric, so linear data is reproduced
        let image = Image::<f32, 1>::from_size_fn([8, 8].into(), |x, y, _| 2.0 * x as f32 + y as f32)?;
        let p = bicubic_interpolation(&image, 3.5, 4.5, BorderMode::Reflect101, 0.0);
        assert_relative_eq!(p[0], 2.0 * 3.5 + 4.5, epsilon = 1e-4);
        Ok(())
    }
}
