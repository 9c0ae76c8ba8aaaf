use thiserror::Error;

/// Error type for tensor creation and access.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// The element count of a shape does not fit in memory.
    #[error("Shape {0:?} holds more elements than can be allocated")]
    ShapeOverflow(Vec<usize>),
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }
}

/// Number of elements of a tensor with `shape` holding `T`s.
///
/// # Errors
///
/// Returns [`TensorError::ShapeOverflow`] if the element count or its size in
/// bytes does not fit in an allocation.
///
/// # Examples
///
/// ```rust
/// use geowarp_tensor::tensor::checked_numel;
///
/// assert_eq!(checked_numel::<f32, 2>([3, 4]), Ok(12));
/// assert!(checked_numel::<f32, 2>([usize::MAX, 2]).is_err());
/// ```
pub fn checked_numel<T, const N: usize>(shape: [usize; N]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .filter(|&numel| {
            numel
                .checked_mul(std::mem::size_of::<T>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| TensorError::ShapeOverflow(shape.to_vec()))
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// # Examples
///
/// ```rust
/// use geowarp_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, contiguous data.
///
/// The layout is always row-major: the rightmost dimension varies fastest.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T, const N: usize> {
    data: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use geowarp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.shape, [2, 2]);
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = checked_numel::<T, N>(shape)?;
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with the given shape filled with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeOverflow`] if the shape is too large to allocate.
    pub fn from_shape_val(shape: [usize; N], value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        let numel = checked_numel::<T, N>(shape)?;
        Ok(Self {
            data: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` by calling `f` with the index of every element.
    ///
    /// # Example
    ///
    /// ```
    /// use geowarp_tensor::Tensor2;
    ///
    /// let t = Tensor2::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8).unwrap();
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Result<Self, TensorError>
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = checked_numel::<T, N>(shape)?;
        let data = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` filled with the default value of `T`.
    pub fn zeros(shape: [usize; N]) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        Self::from_shape_val(shape, T::default())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the tensor data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the tensor data as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the linear offset of `index`, or `None` if any coordinate is out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Returns the linear offset of `index` without checking the bounds.
    #[inline]
    pub fn get_iter_offset_unchecked(&self, index: [usize; N]) -> usize {
        index
            .iter()
            .zip(self.strides)
            .map(|(&idx, stride)| idx * stride)
            .sum()
    }

    /// Get the element at the given index without checking the bounds.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies outside the underlying buffer.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        &self.data[self.get_iter_offset_unchecked(index)]
    }

    /// Get the element at the given index, or `None` when out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use geowarp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get([1, 0]), Some(&3));
    /// assert!(t.get([2, 0]).is_none());
    /// ```
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index).and_then(|i| self.data.get(i))
    }
}
