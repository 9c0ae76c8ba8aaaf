#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `geowarp-tensor` provides the contiguous, row-major storage used by images
//! and coordinate maps. Tensors own their data in a `Vec<T>` and carry their
//! shape and strides as const-generic arrays, so the dimensionality is checked
//! at compile time.
//!
//! ```rust
//! use geowarp_tensor::Tensor2;
//!
//! let t = Tensor2::from_shape_vec([2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.get([1, 2]), Some(&6.0));
//! assert_eq!(t.strides, [3, 1]);
//! ```

/// Tensor type and associated errors.
pub mod tensor;

pub use crate::tensor::{Tensor, TensorError};

/// Type alias for a 2D tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3D tensor.
pub type Tensor3<T> = Tensor<T, 3>;
