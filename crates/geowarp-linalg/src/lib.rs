#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Fixed-size 2x2 and 2xN matrices used by the analytic affine path.
pub mod mat2;

/// Dense least-squares solver on top of faer.
pub mod lstsq;

pub use lstsq::{solve_least_squares, LinalgError, RANK_TOLERANCE};
pub use mat2::{Mat2, Mat2xN};
