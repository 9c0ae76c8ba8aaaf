use geowarp_image::ImageSize;
use geowarp_linalg::{Mat2, Mat2xN};

use crate::error::WarpError;
use crate::interpolation::CoordinateMap;

/// Slack subtracted from the canvas extent before rounding up.
///
/// A 90 degree rotation leaves `cos` at about `6e-17`, which would otherwise grow
/// the canvas by one pixel.
const CANVAS_EPSILON: f64 = 1e-6;

/// Returns the forward matrix of a rotation followed by an axis-aligned scale.
///
/// The matrix is `E = R(θ) · diag(sx, sy)` with
///
/// | cos θ   sin θ |
/// | -sin θ  cos θ |
///
/// and maps source pixel offsets to destination pixel offsets. Its inverse is the
/// destination to source transform used by [`generate_rotation_scale_map`].
///
/// # Arguments
///
/// * `rotation_degrees` - The angle of rotation in degrees.
/// * `scale_x` - The scale factor along the columns.
/// * `scale_y` - The scale factor along the rows.
///
/// # Example
///
/// ```
/// use geowarp_imgproc::warp::rotation_scale_matrix;
///
/// let e = rotation_scale_matrix(0.0, 2.0, 0.5);
/// assert_eq!(e.mul_vec([1.0, 1.0]), [2.0, 0.5]);
/// ```
pub fn rotation_scale_matrix(rotation_degrees: f64, scale_x: f64, scale_y: f64) -> Mat2 {
    Mat2::rotation(rotation_degrees) * Mat2::diag(scale_x, scale_y)
}

/// Generates the coordinate map that rotates and scales an image about its center.
///
/// The destination canvas is sized to hold the whole transformed source: the four
/// source corners are pushed through [`rotation_scale_matrix`] and the bounding box
/// of the result, rounded up, gives the destination size. Each destination pixel is
/// then taken relative to the destination center, sent through the exact inverse
/// transform and re-offset by the source center.
///
/// Coordinates are `(x, y) = (column, row)`; the center of an `n` pixel axis is
/// `(n - 1) / 2`.
///
/// # Arguments
///
/// * `src_size` - The size of the source image.
/// * `rotation_degrees` - The angle of rotation in degrees, positive is counter-clockwise.
/// * `scale` - The `[x, y]` scale factors, both strictly positive.
///
/// # Errors
///
/// Returns [`WarpError::InvalidParameter`] if a scale factor is not a positive
/// finite number, the rotation is not finite, or the source is empty, and when
/// the warped canvas holds more pixels than can be allocated.
///
/// # Example
///
/// ```
/// use geowarp_imgproc::warp::generate_rotation_scale_map;
///
/// let map = generate_rotation_scale_map([5, 3].into(), 90.0, [1.0, 1.0]).unwrap();
/// assert_eq!(map.size().width, 3);
/// assert_eq!(map.size().height, 5);
/// ```
pub fn generate_rotation_scale_map(
    src_size: ImageSize,
    rotation_degrees: f64,
    scale: [f64; 2],
) -> Result<CoordinateMap, WarpError> {
    let [scale_x, scale_y] = scale;
    if !(scale_x.is_finite() && scale_x > 0.0 && scale_y.is_finite() && scale_y > 0.0) {
        return Err(WarpError::InvalidParameter(format!(
            "scale factors must be positive and finite, got [{scale_x}, {scale_y}]"
        )));
    }
    if !rotation_degrees.is_finite() {
        return Err(WarpError::InvalidParameter(format!(
            "rotation must be finite, got {rotation_degrees}"
        )));
    }
    if src_size.is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "cannot warp an empty image ({src_size})"
        )));
    }

    let edge = rotation_scale_matrix(rotation_degrees, scale_x, scale_y);
    let inverse = edge.inverse().ok_or_else(|| {
        WarpError::InvalidParameter(format!(
            "rotation/scale matrix is singular for scale [{scale_x}, {scale_y}]"
        ))
    })?;

    let (cols, rows) = (src_size.width as f64, src_size.height as f64);
    let corners = Mat2xN::from_columns([[0.0, 0.0], [cols, 0.0], [0.0, rows], [cols, rows]]);
    let (min, max) = (edge * corners).row_bounds();

    let extent = |lo: f64, hi: f64| ((hi - lo - CANVAS_EPSILON).ceil() as usize).max(1);
    let dst_size = ImageSize {
        width: extent(min[0], max[0]),
        height: extent(min[1], max[1]),
    };

    log::debug!(
        "rotation {}deg scale [{}, {}]: {} -> {}",
        rotation_degrees,
        scale_x,
        scale_y,
        src_size,
        dst_size
    );

    let dst_center = [
        (dst_size.width as f64 - 1.0) / 2.0,
        (dst_size.height as f64 - 1.0) / 2.0,
    ];
    let src_center = [(cols - 1.0) / 2.0, (rows - 1.0) / 2.0];

    CoordinateMap::from_fn(dst_size, |col, row| {
        let offset = [col as f64 - dst_center[0], row as f64 - dst_center[1]];
        let [x, y] = inverse.mul_vec(offset);
        ((x + src_center[0]) as f32, (y + src_center[1]) as f32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_transform() -> Result<(), WarpError> {
        let map = generate_rotation_scale_map([7, 4].into(), 0.0, [1.0, 1.0])?;
        assert_eq!(map.size(), ImageSize { width: 7, height: 4 });
        for row in 0..4 {
            for col in 0..7 {
                assert_eq!(map.get(col, row), Some((col as f32, row as f32)));
            }
        }
        Ok(())
    }

    #[test]
    fn anisotropic_scale() -> Result<(), WarpError> {
        let map = generate_rotation_scale_map([4, 4].into(), 0.0, [2.0, 1.0])?;
        assert_eq!(map.size(), ImageSize { width: 8, height: 4 });
        // x = col / 2 - 0.25, y = row
        let (x, y) = map.get(3, 1).unwrap_or_default();
        assert_relative_eq!(x, 1.25);
        assert_relative_eq!(y, 1.0);
        let (x, _) = map.get(0, 0).unwrap_or_default();
        assert_relative_eq!(x, -0.25);
        Ok(())
    }

    #[test]
    fn quarter_turn_swaps_axes() -> Result<(), WarpError> {
        let map = generate_rotation_scale_map([5, 3].into(), 90.0, [1.0, 1.0])?;
        assert_eq!(map.size(), ImageSize { width: 3, height: 5 });
        for row in 0..5 {
            for col in 0..3 {
                let (x, y) = map.get(col, row).unwrap_or_default();
                assert_relative_eq!(x, 4.0 - row as f32, epsilon = 1e-5);
                assert_relative_eq!(y, col as f32, epsilon = 1e-5);
            }
        }
        Ok(())
    }

    #[test]
    fn canvas_contains_rotated_source() -> Result<(), WarpError> {
        let map = generate_rotation_scale_map([100, 50].into(), 30.0, [1.3, 0.8])?;
        // bounding box of the rotated 130x40 rectangle
        let (s, c) = 30f64.to_radians().sin_cos();
        let w = (c * 130.0 + s * 40.0).ceil() as usize;
        let h = (s * 130.0 + c * 40.0).ceil() as usize;
        assert_eq!(map.size(), ImageSize { width: w, height: h });
        Ok(())
    }

    #[test]
    fn invalid_parameters() {
        let size: ImageSize = [4, 4].into();
        for scale in [[0.0, 1.0], [1.0, -2.0], [f64::NAN, 1.0], [1.0, f64::INFINITY]] {
            assert!(matches!(
                generate_rotation_scale_map(size, 0.0, scale),
                Err(WarpError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            generate_rotation_scale_map(size, f64::NAN, [1.0, 1.0]),
            Err(WarpError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_rotation_scale_map([0, 4].into(), 0.0, [1.0, 1.0]),
            Err(WarpError::InvalidParameter(_))
        ));
    }

    #[test]
    fn huge_scale_is_rejected() {
        let size: ImageSize = [100, 100].into();
        assert!(matches!(
            generate_rotation_scale_map(size, 0.0, [1e12, 1e12]),
            Err(WarpError::InvalidParameter(_))
        ));
        // one saturated axis times a single row
        assert!(matches!(
            generate_rotation_scale_map(size, 0.0, [1e300, 1e-30]),
            Err(WarpError::InvalidParameter(_))
        ));
    }
}
