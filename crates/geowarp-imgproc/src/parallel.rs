use rayon::prelude::*;

use geowarp_image::Image;
use geowarp_tensor::Tensor2;

/// Apply a function to each destination pixel for grid sampling in parallel.
///
/// Rows of `dst` are distributed over the rayon thread pool; each worker owns a
/// disjoint set of destination rows and reads the matching rows of the maps.
///
/// # Arguments
///
/// * `dst` - The destination image, with the same rows and columns as the maps.
/// * `map_x` - The source x coordinate of every destination pixel.
/// * `map_y` - The source y coordinate of every destination pixel.
/// * `f` - Called with `(x, y, dst_pixel)` for every destination pixel.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &Tensor2<f32>,
    map_y: &Tensor2<f32>,
    f: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x.as_slice().par_chunks_exact(cols))
        .zip(map_y.as_slice().par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}

/// Fill a pair of coordinate grids in parallel by rows.
///
/// `f` is called with `(col, row)` and returns the `(x, y)` value stored at that cell.
pub fn par_iter_rows_grid(
    map_x: &mut [f32],
    map_y: &mut [f32],
    cols: usize,
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) {
    if cols == 0 {
        return;
    }

    map_x
        .par_chunks_exact_mut(cols)
        .zip(map_y.par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row, (row_x, row_y))| {
            row_x
                .iter_mut()
                .zip(row_y.iter_mut())
                .enumerate()
                .for_each(|(col, (x, y))| {
                    (*x, *y) = f(col, row);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowarp_image::ImageError;

    #[test]
    fn resample_visits_every_pixel() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 2>::from_size_val([3, 2].into(), 0.0)?;
        let map_x = Tensor2::from_shape_fn([2, 3], |[_, c]| c as f32)?;
        let map_y = Tensor2::from_shape_fn([2, 3], |[r, _]| r as f32)?;

        par_iter_rows_resample(&mut dst, &map_x, &map_y, |&x, &y, pixel| {
            pixel[0] = x;
            pixel[1] = y;
        });

        assert_eq!(
            dst.as_slice(),
            &[0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0]
        );
        Ok(())
    }

    #[test]
    fn grid_rows_and_cols() {
        let mut xs = vec![0.0; 6];
        let mut ys = vec![0.0; 6];
        par_iter_rows_grid(&mut xs, &mut ys, 3, |col, row| {
            (col as f32 * 10.0, row as f32)
        });
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 0.0, 10.0, 20.0]);
        assert_eq!(ys, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }
}
