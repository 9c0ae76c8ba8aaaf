use std::ops;

use geowarp_tensor::{tensor::checked_numel, Tensor3};

use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use geowarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true when the size covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for pixel types the resampler can read and write.
///
/// Samples are blended in `f32`; integer types round and saturate on the way back.
pub trait ImageDtype: Copy + Default + Send + Sync {
    /// Convert the value to `f32`.
    fn to_f32(self) -> f32;

    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn to_f32(self) -> f32 {
        self as f32
    }

    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageDtype for u16 {
    fn to_f32(self) -> f32 {
        self as f32
    }

    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// Represents an image with pixel data.
///
/// The image is a 3D tensor with shape (H, W, C), channel-last, where H is the
/// height, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize>(pub Tensor3<T>);

/// helper to deference the inner tensor
impl<T, const CHANNELS: usize> ops::Deref for Image<T, CHANNELS> {
    type Target = Tensor3<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// helper to deference the inner tensor
impl<T, const CHANNELS: usize> ops::DerefMut for Image<T, CHANNELS> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image, channel-last.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or the size
    /// is too large to allocate, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use geowarp_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let numel = checked_numel::<T, 3>([size.height, size.width, CHANNELS])?;
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }

        Ok(Self(Tensor3::from_shape_vec(
            [size.height, size.width, CHANNELS],
            data,
        )?))
    }

    /// Create a new image with the given size and every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Ok(Self(Tensor3::from_shape_val(
            [size.height, size.width, CHANNELS],
            val,
        )?))
    }

    /// Create a new image by calling `f(x, y, ch)` for every sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use geowarp_image::{Image, ImageSize};
    ///
    /// let image =
    ///     Image::<f32, 1>::from_size_fn([3, 2].into(), |x, y, _| (y * 3 + x) as f32).unwrap();
    /// assert_eq!(image.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn from_size_fn<F>(size: ImageSize, f: F) -> Result<Self, ImageError>
    where
        F: Fn(usize, usize, usize) -> T,
    {
        Ok(Self(Tensor3::from_shape_fn(
            [size.height, size.width, CHANNELS],
            |[y, x, ch]| f(x, y, ch),
        )?))
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if a value is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .as_slice()
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size(), casted_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape[1]
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape[0]
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get a sample of the image.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// Returns an error when the pixel or channel lies outside the image.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(*self.get_unchecked([y, x, ch]))
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageDtype, ImageError, ImageSize};
    use geowarp_tensor::TensorError;

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_data_length() {
        let res = Image::<f32, 2>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0; 7],
        );
        assert_eq!(res.err(), Some(ImageError::InvalidChannelShape(7, 8)));
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize {
            width: usize::MAX,
            height: 2,
        };
        let res = Image::<u8, 3>::new(size, vec![]);
        assert!(matches!(
            res,
            Err(ImageError::TensorError(TensorError::ShapeOverflow(_)))
        ));
        assert!(Image::<f32, 1>::from_size_val(size, 0.0).is_err());
        assert!(Image::<f32, 1>::from_size_fn(size, |_, _, _| 0.0).is_err());
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<_, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        assert_eq!(image_u8.get([1, 0, 2]), Some(&5u8));

        let image_f32: Image<f32, 3> = image_u8.cast()?;
        assert_eq!(image_f32.get([1, 0, 2]), Some(&5.0f32));

        let negative = Image::<f32, 1>::new([1, 1].into(), vec![-1.0])?;
        assert_eq!(negative.cast::<u8>().err(), Some(ImageError::CastError));

        Ok(())
    }

    #[test]
    fn image_get_pixel() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::from_size_fn([3, 2].into(), |x, y, ch| {
            (y * 30 + x * 10 + ch) as f32
        })?;
        assert_eq!(image.get_pixel(2, 1, 1)?, 51.0);
        assert_eq!(
            image.get_pixel(3, 0, 0).err(),
            Some(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert_eq!(
            image.get_pixel(0, 0, 2).err(),
            Some(ImageError::ChannelIndexOutOfBounds(2, 2))
        );

        Ok(())
    }

    #[test]
    fn dtype_saturates() {
        assert_eq!(u8::from_f32(-3.2), 0);
        assert_eq!(u8::from_f32(254.6), 255);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u16::from_f32(1000.4), 1000);
        assert_eq!(7u8.to_f32(), 7.0);
    }
}
