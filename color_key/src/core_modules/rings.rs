// THEORY:
// The ring generator draws a square of concentric one-pixel-wide rings. A pixel's
// ring index is its distance to the nearest edge:
//
//     d = min(x, y, size - 1 - x, size - 1 - y)
//
// Even rings take the "colored" RGBA value and odd rings the "transparent" one, so
// the outermost ring is always colored. The generator also reports how many
// colored pixels it drew, which is what a user reads off when sizing a template.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{ColorKeyError, Result};

pub const DEFAULT_RING_SIZE: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// Width and height of the square image in pixels.
    pub size: u32,
    pub colored: [Channel; 4],
    pub transparent: [Channel; 4],
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_RING_SIZE,
            colored: [0, 0, 0, 255],
            transparent: [0, 0, 0, 0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RingImage {
    pub buffer: PixelBuffer,
    /// Number of pixels drawn with the colored value.
    pub colored_pixels: usize,
}

pub fn generate_rings(config: &RingConfig) -> Result<RingImage> {
    let size = config.size;
    if size == 0 {
        return Err(ColorKeyError::InvalidDimensions {
            width: 0,
            height: 0,
            len: 0,
        });
    }

    let [r, g, b, a] = config.colored;
    let colored = Pixel::new(r, g, b, a);
    let [r, g, b, a] = config.transparent;
    let transparent = Pixel::new(r, g, b, a);

    let mut buffer = PixelBuffer::blank(size, size)?;
    let mut colored_pixels = 0;
    for y in 0..size {
        for x in 0..size {
            let ring = ring_index(x, y, size);
            let pixel = if ring % 2 == 0 {
                colored_pixels += 1;
                colored
            } else {
                transparent
            };
            buffer.set_pixel(x, y, pixel);
        }
    }

    tracing::debug!(size, colored_pixels, "rings generated");
    Ok(RingImage {
        buffer,
        colored_pixels,
    })
}

#[inline]
fn ring_index(x: u32, y: u32, size: u32) -> u32 {
    x.min(y).min(size - 1 - x).min(size - 1 - y)
}
