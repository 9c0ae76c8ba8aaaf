use std::ops::Mul;

/// A 2x2 matrix stored row-major.
///
/// Vectors are column vectors `[x, y]`, so `m.mul_vec(v)` computes `M · v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    /// Matrix entries, `m[row][col]`.
    pub m: [[f64; 2]; 2],
}

impl Mat2 {
    /// Create a matrix from its rows.
    pub const fn new(m: [[f64; 2]; 2]) -> Self {
        Self { m }
    }

    /// The identity matrix.
    pub const fn identity() -> Self {
        Self::diag(1.0, 1.0)
    }

    /// A diagonal matrix `diag(a, b)`.
    pub const fn diag(a: f64, b: f64) -> Self {
        Self {
            m: [[a, 0.0], [0.0, b]],
        }
    }

    /// Rotation by `degrees` in image coordinates (x right, y down).
    ///
    /// ```text
    /// | cos θ   sin θ |
    /// | -sin θ  cos θ |
    /// ```
    ///
    /// Positive angles turn the picture counter-clockwise as seen on screen.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            m: [[cos, sin], [-sin, cos]],
        }
    }

    /// Matrix-vector product `M · v`.
    #[inline]
    pub fn mul_vec(&self, v: [f64; 2]) -> [f64; 2] {
        [
            self.m[0][0] * v[0] + self.m[0][1] * v[1],
            self.m[1][0] * v[0] + self.m[1][1] * v[1],
        ]
    }

    /// Determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Transpose of the matrix.
    pub fn transpose(&self) -> Self {
        Self {
            m: [[self.m[0][0], self.m[1][0]], [self.m[0][1], self.m[1][1]]],
        }
    }

    /// Inverse of the matrix, or `None` when it is singular or not finite.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self {
            m: [
                [self.m[1][1] * inv_det, -self.m[0][1] * inv_det],
                [-self.m[1][0] * inv_det, self.m[0][0] * inv_det],
            ],
        })
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Mat2 {
        let a = &self.m;
        let b = &rhs.m;
        Mat2 {
            m: [
                [
                    a[0][0] * b[0][0] + a[0][1] * b[1][0],
                    a[0][0] * b[0][1] + a[0][1] * b[1][1],
                ],
                [
                    a[1][0] * b[0][0] + a[1][1] * b[1][0],
                    a[1][0] * b[0][1] + a[1][1] * b[1][1],
                ],
            ],
        }
    }
}

/// A 2xN matrix stored as `N` column vectors, e.g. a set of 2D points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2xN<const N: usize> {
    /// The columns of the matrix.
    pub cols: [[f64; 2]; N],
}

impl<const N: usize> Mat2xN<N> {
    /// Create a matrix from its columns.
    pub const fn from_columns(cols: [[f64; 2]; N]) -> Self {
        Self { cols }
    }

    /// The `i`-th column.
    pub fn column(&self, i: usize) -> [f64; 2] {
        self.cols[i]
    }

    /// Per-row minimum and maximum, i.e. the bounding box `([min_x, min_y], [max_x, max_y])`.
    pub fn row_bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for col in &self.cols {
            for k in 0..2 {
                min[k] = min[k].min(col[k]);
                max[k] = max[k].max(col[k]);
            }
        }
        (min, max)
    }
}

impl<const N: usize> Mul<Mat2xN<N>> for Mat2 {
    type Output = Mat2xN<N>;

    fn mul(self, rhs: Mat2xN<N>) -> Mat2xN<N> {
        Mat2xN {
            cols: rhs.cols.map(|c| self.mul_vec(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mat2, Mat2xN};
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: &Mat2, b: &Mat2) {
        for r in 0..2 {
            for c in 0..2 {
                assert_relative_eq!(a.m[r][c], b.m[r][c], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn rotation_90() {
        let r = Mat2::rotation(90.0);
        let v = r.mul_vec([1.0, 0.0]);
        // x axis turns towards the top of the image
        assert_relative_eq!(v[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_roundtrip() {
        let m = Mat2::rotation(30.0) * Mat2::diag(1.3, 0.8);
        let inv = m.inverse().unwrap();
        assert_mat_eq(&(m * inv), &Mat2::identity());
        assert_mat_eq(&inv, &(Mat2::diag(1.0 / 1.3, 1.0 / 0.8) * Mat2::rotation(30.0).transpose()));
    }

    #[test]
    fn inverse_singular() {
        assert!(Mat2::new([[1.0, 2.0], [2.0, 4.0]]).inverse().is_none());
        assert!(Mat2::diag(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn mat2xn_bounds() {
        let corners = Mat2xN::from_columns([[0.0, 0.0], [4.0, 0.0], [0.0, 3.0], [4.0, 3.0]]);
        let scaled = Mat2::diag(2.0, -1.0) * corners;
        assert_eq!(scaled.column(3), [8.0, -3.0]);
        let (min, max) = scaled.row_bounds();
        assert_eq!(min, [0.0, -3.0]);
        assert_eq!(max, [8.0, 0.0]);
    }
}
