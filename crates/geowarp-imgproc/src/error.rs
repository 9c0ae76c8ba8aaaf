use geowarp_image::ImageError;
use geowarp_linalg::LinalgError;
use geowarp_tensor::TensorError;

/// Errors raised while generating coordinate maps or resampling images.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// A parameter is outside of its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Fewer control points than the polynomial order needs.
    #[error("Insufficient control points: polynomial needs at least {required}, got {actual}")]
    InsufficientPoints {
        /// Number of points the polynomial order needs.
        required: usize,
        /// Number of points provided.
        actual: usize,
    },

    /// The control points do not determine a unique polynomial.
    #[error("Degenerate control point configuration: {0}")]
    DegenerateFit(#[from] LinalgError),

    /// Two inputs that must agree in shape or length do not.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A line of a control point file could not be parsed.
    #[error("Malformed control point data at line {line}: {reason}")]
    GcpParse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Reading control point data failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the tensor container.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
