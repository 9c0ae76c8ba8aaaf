use geowarp_image::ImageSize;
use geowarp_tensor::{Tensor2, TensorError};

use crate::error::WarpError;
use crate::parallel;

/// Per destination pixel source location, stored as two same-shaped grids.
///
/// `map_x[[r, c]]` / `map_y[[r, c]]` hold the fractional source column / row that
/// destination pixel `(r, c)` samples from. Values may fall outside the source;
/// the resampler's border policy takes care of them.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMap {
    map_x: Tensor2<f32>,
    map_y: Tensor2<f32>,
}

impl CoordinateMap {
    /// Create a map from its x and y grids.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::ShapeMismatch`] if the grids have different shapes.
    pub fn new(map_x: Tensor2<f32>, map_y: Tensor2<f32>) -> Result<Self, WarpError> {
        if map_x.shape != map_y.shape {
            return Err(WarpError::ShapeMismatch(format!(
                "map_x has shape {:?} but map_y has shape {:?}",
                map_x.shape, map_y.shape
            )));
        }
        Ok(Self { map_x, map_y })
    }

    /// Create a map by evaluating `f(col, row) -> (x, y)` for every destination pixel.
    ///
    /// Rows are evaluated in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidParameter`] if `size` holds more pixels than
    /// can be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use geowarp_imgproc::interpolation::CoordinateMap;
    ///
    /// // sample every other source column
    /// let map = CoordinateMap::from_fn([3, 2].into(), |c, r| (2.0 * c as f32, r as f32)).unwrap();
    /// assert_eq!(map.get(2, 1), Some((4.0, 1.0)));
    /// ```
    pub fn from_fn(
        size: ImageSize,
        f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
    ) -> Result<Self, WarpError> {
        let shape = [size.height, size.width];
        let too_large = |err: TensorError| {
            WarpError::InvalidParameter(format!("destination size {size} is too large: {err}"))
        };
        let mut map_x = Tensor2::zeros(shape).map_err(too_large)?;
        let mut map_y = Tensor2::zeros(shape).map_err(too_large)?;
        parallel::par_iter_rows_grid(
            map_x.as_slice_mut(),
            map_y.as_slice_mut(),
            size.width,
            f,
        );
        Ok(Self { map_x, map_y })
    }

    /// The identity map: every destination pixel samples the same source pixel.
    pub fn identity(size: ImageSize) -> Result<Self, WarpError> {
        Self::from_fn(size, |col, row| (col as f32, row as f32))
    }

    /// The destination size covered by the map.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.map_x.shape[1],
            height: self.map_x.shape[0],
        }
    }

    /// The source x coordinate (column) of every destination pixel.
    pub fn map_x(&self) -> &Tensor2<f32> {
        &self.map_x
    }

    /// The source y coordinate (row) of every destination pixel.
    pub fn map_y(&self) -> &Tensor2<f32> {
        &self.map_y
    }

    /// The source location `(x, y)` of destination pixel `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> Option<(f32, f32)> {
        Some((*self.map_x.get([row, col])?, *self.map_y.get([row, col])?))
    }

    /// Consume the map and return its `(map_x, map_y)` grids.
    pub fn into_parts(self) -> (Tensor2<f32>, Tensor2<f32>) {
        (self.map_x, self.map_y)
    }
}
