use geowarp_image::ImageSize;
use geowarp_linalg::solve_least_squares;

use super::control_points::ControlPoints;
use crate::error::WarpError;
use crate::interpolation::CoordinateMap;

/// Number of monomials `x^i · y^j` with `i + j <= order`, i.e. `(order + 1)(order + 2) / 2`.
///
/// # Example
///
/// ```
/// use geowarp_imgproc::warp::num_polynomial_terms;
///
/// assert_eq!(num_polynomial_terms(1), 3);
/// assert_eq!(num_polynomial_terms(3), 10);
/// ```
pub fn num_polynomial_terms(order: u32) -> usize {
    let k = order as usize;
    k.saturating_add(1).saturating_mul(k.saturating_add(2)) / 2
}

/// The monomials of `(x, y)` up to total degree `order`.
///
/// Terms are sorted by total degree, then by decreasing power of x:
/// `1, x, y, x², xy, y², x³, x²y, xy², y³, ...`
fn monomials(x: f64, y: f64, order: i32) -> impl Iterator<Item = f64> {
    (0..=order).flat_map(move |degree| (0..=degree).map(move |j| x.powi(degree - j) * y.powi(j)))
}

/// Similarity that moves points to their centroid and scales them to a mean
/// distance of `sqrt(2)` from it.
#[derive(Debug, Clone, Copy)]
struct Normalization {
    center: [f64; 2],
    scale: f64,
}

impl Normalization {
    fn from_points(points: &[[f64; 2]]) -> Self {
        let n = points.len().max(1) as f64;
        let center = points
            .iter()
            .fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]])
            .map(|v| v / n);

        let mean_dist = points
            .iter()
            .map(|p| (p[0] - center[0]).hypot(p[1] - center[1]))
            .sum::<f64>()
            / n;

        let scale = if mean_dist > 0.0 {
            std::f64::consts::SQRT_2 / mean_dist
        } else {
            1.0
        };

        Self { center, scale }
    }

    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.center[0]) * self.scale,
            (y - self.center[1]) * self.scale,
        )
    }
}

/// A pair of 2D polynomials mapping destination coordinates to source coordinates.
#[derive(Debug, Clone)]
struct PolynomialModel {
    order: i32,
    normalization: Normalization,
    coeffs_x: Vec<f64>,
    coeffs_y: Vec<f64>,
}

impl PolynomialModel {
    /// Least-squares fit of `source ≈ P(target)`, one polynomial per source axis.
    fn fit(control_points: &ControlPoints, order: u32) -> Result<Self, WarpError> {
        let num_terms = num_polynomial_terms(order);
        let order = i32::try_from(order).map_err(|_| {
            WarpError::InvalidParameter(format!("polynomial order {order} is too large"))
        })?;
        let normalization = Normalization::from_points(control_points.target());

        let mut design = faer::Mat::<f64>::zeros(control_points.len(), num_terms);
        for (row, target) in control_points.target().iter().enumerate() {
            let (x, y) = normalization.apply(target[0], target[1]);
            for (col, t) in monomials(x, y, order).enumerate() {
                design.write(row, col, t);
            }
        }

        let src_x: Vec<f64> = control_points.source().iter().map(|p| p[0]).collect();
        let src_y: Vec<f64> = control_points.source().iter().map(|p| p[1]).collect();
        let coeffs_x = solve_least_squares(&design, &src_x)?;
        let coeffs_y = solve_least_squares(&design, &src_y)?;

        let model = Self {
            order,
            normalization,
            coeffs_x,
            coeffs_y,
        };

        log::debug!(
            "order {} fit over {} control points: rms residual {:.6} px",
            order,
            control_points.len(),
            model.rms_residual(control_points)
        );

        Ok(model)
    }

    /// Source location `(x, y)` for destination location `(x, y)`.
    fn evaluate(&self, x: f64, y: f64) -> (f64, f64) {
        let (x, y) = self.normalization.apply(x, y);
        monomials(x, y, self.order)
            .zip(self.coeffs_x.iter().zip(&self.coeffs_y))
            .fold((0.0, 0.0), |(sx, sy), (t, (cx, cy))| (sx + cx * t, sy + cy * t))
    }

    fn rms_residual(&self, control_points: &ControlPoints) -> f64 {
        if control_points.is_empty() {
            return 0.0;
        }
        let sum_sq = control_points
            .iter()
            .map(|(src, dst)| {
                let (x, y) = self.evaluate(dst[0], dst[1]);
                (x - src[0]).powi(2) + (y - src[1]).powi(2)
            })
            .sum::<f64>();
        (sum_sq / control_points.len() as f64).sqrt()
    }
}

/// Generates a coordinate map from ground control points with a 2D polynomial fit.
///
/// Two polynomials of total degree `order`, one per source axis, are fitted in the
/// least-squares sense so that evaluating them at a control point's target location
/// gives its source location. The fit is then evaluated at every destination pixel
/// `(col, row)`. With exactly [`num_polynomial_terms`] well spread points the
/// polynomials interpolate the control points.
///
/// Target coordinates are normalized (centroid at the origin, mean distance `sqrt(2)`)
/// before the fit, which keeps order 3 fits over large images well conditioned.
///
/// # Arguments
///
/// * `dst_size` - The size of the destination (map) frame to populate.
/// * `control_points` - The source/target correspondences.
/// * `order` - The total degree of the polynomials, at least 1.
///
/// # Errors
///
/// Checked in this order:
///
/// * [`WarpError::InvalidParameter`] if `order` is 0 or `dst_size` is empty.
/// * [`WarpError::InsufficientPoints`] if there are fewer points than polynomial terms.
/// * [`WarpError::DegenerateFit`] if the points do not determine the polynomials,
///   e.g. duplicated or collinear points.
///
/// # Example
///
/// ```
/// use geowarp_imgproc::warp::{generate_control_point_map, ControlPoints};
///
/// // the source is the destination shifted by (5, -3)
/// let target = vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];
/// let source = target.iter().map(|p| [p[0] + 5.0, p[1] - 3.0]).collect();
/// let points = ControlPoints::new(source, target).unwrap();
///
/// let map = generate_control_point_map([4, 4].into(), &points, 1).unwrap();
/// let (x, y) = map.get(2, 1).unwrap();
/// assert!((x - 7.0).abs() < 1e-4 && (y + 2.0).abs() < 1e-4);
/// ```
pub fn generate_control_point_map(
    dst_size: ImageSize,
    control_points: &ControlPoints,
    order: u32,
) -> Result<CoordinateMap, WarpError> {
    if order == 0 {
        return Err(WarpError::InvalidParameter(
            "polynomial order must be at least 1".to_string(),
        ));
    }
    if dst_size.is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "destination must not be empty ({dst_size})"
        )));
    }

    let required = num_polynomial_terms(order);
    if control_points.len() < required {
        return Err(WarpError::InsufficientPoints {
            required,
            actual: control_points.len(),
        });
    }

    let model = PolynomialModel::fit(control_points, order)?;

    CoordinateMap::from_fn(dst_size, |col, row| {
        let (x, y) = model.evaluate(col as f64, row as f64);
        (x as f32, y as f32)
    })
}
