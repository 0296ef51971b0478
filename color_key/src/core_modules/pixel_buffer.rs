// THEORY:
// A `PixelBuffer` is the in-memory form of an image: `width * height` RGBA pixels
// laid out row-major, four bytes each, exactly as a decoder hands them over. The
// constructor is the only place the length invariant is checked; every other
// operation can rely on it.

use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Pixel};
use crate::error::{ColorKeyError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Byte>,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes. Fails if the length is not `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<Byte>) -> Result<Self> {
        if Self::byte_len(width, height) != Some(data.len()) {
            return Err(ColorKeyError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent black buffer.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let len = Self::byte_len(width, height).ok_or(ColorKeyError::InvalidDimensions {
            width,
            height,
            len: 0,
        })?;
        Self::new(width, height, vec![0; len])
    }

    /// A buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let mut buffer = Self::blank(width, height)?;
        let bytes: [Byte; CHANNELS] = pixel.into();
        for chunk in buffer.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&bytes);
        }
        Ok(buffer)
    }

    fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(CHANNELS)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[Byte] {
        &self.data
    }

    /// Mutable view of the bytes. A slice cannot change length, so the invariant holds.
    pub(crate) fn bytes_mut(&mut self) -> &mut [Byte] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<Byte> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|chunk| Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]))
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Pixel::try_from(&self.data[start..start + CHANNELS]).ok()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x >= self.width || y >= self.height {
            return;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let bytes: [Byte; CHANNELS] = pixel.into();
        self.data[start..start + CHANNELS].copy_from_slice(&bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            ColorKeyError::InvalidDimensions { width: 2, height: 2, len: 15 }
        ));
    }

    #[test]
    fn filled_and_indexed() {
        let mut buffer = PixelBuffer::filled(3, 2, Pixel::new(1, 2, 3, 4)).unwrap();
        assert_eq!(buffer.pixel_count(), 6);
        buffer.set_pixel(2, 1, Pixel::new(9, 9, 9, 9));
        assert_eq!(buffer.pixel_at(2, 1), Some(Pixel::new(9, 9, 9, 9)));
        assert_eq!(buffer.pixel_at(0, 0), Some(Pixel::new(1, 2, 3, 4)));
        assert_eq!(buffer.pixel_at(3, 0), None);
        assert_eq!(buffer.as_bytes()[20..24], [9, 9, 9, 9]);
    }

    #[test]
    fn empty_image_is_allowed() {
        let buffer = PixelBuffer::blank(0, 5).unwrap();
        assert_eq!(buffer.pixels().count(), 0);
    }
}
