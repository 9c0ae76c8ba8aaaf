use std::str::FromStr;

use geowarp_image::{Image, ImageDtype};

use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::border::BorderMode;
use super::nearest::nearest_neighbor_interpolation;
use crate::error::WarpError;

/// Interpolation mode for the remap operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic (cubic convolution) interpolation
    Bicubic,
}

impl FromStr for InterpolationMode {
    type Err = WarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" | "linear" => Ok(InterpolationMode::Bilinear),
            "bicubic" | "cubic" => Ok(InterpolationMode::Bicubic),
            _ => Err(WarpError::InvalidParameter(format!(
                "unknown interpolation mode `{s}`"
            ))),
        }
    }
}

/// OpenCV `INTER_*` codes.
impl TryFrom<i32> for InterpolationMode {
    type Error = WarpError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(InterpolationMode::Nearest),
            1 => Ok(InterpolationMode::Bilinear),
            2 => Ok(InterpolationMode::Bicubic),
            _ => Err(WarpError::InvalidParameter(format!(
                "unknown interpolation code {code}"
            ))),
        }
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How samples outside the image are produced.
/// * `border_value` - The sample value used by [`BorderMode::Constant`].
///
/// # Returns
///
/// The interpolated value of every channel. Non-finite coordinates produce
/// `border_value` in every channel.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: BorderMode,
    border_value: f32,
) -> [f32; C] {
    if !u.is_finite() || !v.is_finite() {
        return [border_value; C];
    }

    match interpolation {
        InterpolationMode::Nearest => {
            nearest_neighbor_interpolation(image, u, v, border, border_value)
        }
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, border, border_value),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, border, border_value),
    }
}

/// Source pixel at integer position `(iu, iv)` after applying the border policy.
#[inline]
pub(crate) fn source_pixel<T, const C: usize>(
    image: &Image<T, C>,
    iu: isize,
    iv: isize,
    border: BorderMode,
) -> Option<&[T]> {
    let iu = border.map_index(iu, image.cols())?;
    let iv = border.map_index(iv, image.rows())?;
    let base = (iv * image.cols() + iu) * C;
    image.as_slice().get(base..base + C)
}

/// Add `weight` times the (border-resolved) sample at `(iu, iv)` to `pixel`.
#[inline]
pub(crate) fn accumulate<T: ImageDtype, const C: usize>(
    pixel: &mut [f32; C],
    image: &Image<T, C>,
    (iu, iv): (isize, isize),
    weight: f32,
    border: BorderMode,
    border_value: f32,
) {
    if weight == 0.0 {
        return;
    }
    match source_pixel(image, iu, iv, border) {
        Some(src) => pixel
            .iter_mut()
            .zip(src)
            .for_each(|(p, &s)| *p += weight * s.to_f32()),
        None => pixel.iter_mut().for_each(|p| *p += weight * border_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowarp_image::ImageError;

    #[test]
    fn parse_modes() -> Result<(), WarpError> {
        assert_eq!("Nearest".parse::<InterpolationMode>()?, InterpolationMode::Nearest);
        assert_eq!("linear".parse::<InterpolationMode>()?, InterpolationMode::Bilinear);
        assert_eq!(InterpolationMode::try_from(2)?, InterpolationMode::Bicubic);
        assert!(matches!(
            "lanczos".parse::<InterpolationMode>(),
            Err(WarpError::InvalidParameter(_))
        ));
        assert!(matches!(
            InterpolationMode::try_from(-1),
            Err(WarpError::InvalidParameter(_))
        ));
        Ok(())
    }

    #[test]
    fn non_finite_coordinates() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::from_size_val([2, 2].into(), 1.0)?;
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            let pixel = interpolate_pixel(&image, f32::NAN, 0.0, mode, BorderMode::Replicate, 7.0);
            assert_eq!(pixel, [7.0, 7.0]);
            let pixel =
                interpolate_pixel(&image, 0.0, f32::INFINITY, mode, BorderMode::Wrap, -1.0);
            assert_eq!(pixel, [-1.0, -1.0]);
        }
        Ok(())
    }

    #[test]
    fn integer_positions_are_exact() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_fn([4, 3].into(), |x, y, _| (y * 4 + x) as u8 * 10)?;
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            for y in 0..3 {
                for x in 0..4 {
                    let pixel =
                        interpolate_pixel(&image, x as f32, y as f32, mode, BorderMode::Reflect, 0.0);
                    assert_eq!(pixel[0], ((y * 4 + x) * 10) as f32);
                }
            }
        }
        Ok(())
    }
}
