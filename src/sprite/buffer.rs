use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{PressError, Result};

/// Borrowed RGBA view over a [`PixelBuffer`]
pub type PixelView<'a> = ImageBuffer<Rgba<u8>, &'a [u8]>;

/// Decoded RGBA image, row-major, 4 bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; expected_len(width, height)],
        }
    }

    /// Wrap raw RGBA bytes, rejecting a length that disagrees with the dimensions
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let buffer = Self {
            width,
            height,
            pixels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    pub fn into_image(self) -> Result<RgbaImage> {
        self.validate()?;
        let (width, height) = (self.width, self.height);
        let expected = expected_len(width, height);
        let actual = self.pixels.len();
        RgbaImage::from_raw(width, height, self.pixels).ok_or(PressError::Decode {
            width,
            height,
            expected,
            actual,
        })
    }

    /// Borrow the pixels as an `image` view without copying
    pub fn view(&self) -> Result<PixelView<'_>> {
        self.validate()?;
        ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice()).ok_or_else(|| {
            PressError::Decode {
                width: self.width,
                height: self.height,
                expected: expected_len(self.width, self.height),
                actual: self.pixels.len(),
            }
        })
    }

    /// Check `pixels.len() == width * height * 4`
    pub fn validate(&self) -> Result<()> {
        let expected = expected_len(self.width, self.height);
        if self.pixels.len() != expected {
            return Err(PressError::Decode {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// RGBA of the pixel at (x, y), or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.pixels.get(start..start + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PressError::Decode {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_from_raw_rejects_long_buffer() {
        // `image` accepts oversized containers, we do not
        assert!(PixelBuffer::from_raw(1, 1, vec![0; 8]).is_err());
    }

    #[test]
    fn test_image_bridge_preserves_pixels() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 40]));

        let buffer = PixelBuffer::from_image(img.clone());
        assert_eq!(buffer.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.view().unwrap().get_pixel(2, 1), &Rgba([10, 20, 30, 40]));
        assert_eq!(buffer.into_image().unwrap(), img);
    }

    #[test]
    fn test_view_of_corrupted_buffer_fails() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.pixels.truncate(10);
        assert!(matches!(buffer.view(), Err(PressError::Decode { .. })));
    }
}
