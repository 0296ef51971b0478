// THEORY:
// The recolor pass is the whole point of the tool: keep the pixels whose color is
// selected, make everything else transparent.
//
// For each pixel (r, g, b, a) of the original:
//   a > 0 and "r,g,b" is active  -> copied unchanged
//   otherwise                    -> r, g, b copied, alpha forced to 0
//
// A pixel that was already fully transparent stays suppressed even when its RGB is
// active. The pass is a pure per-pixel map that always reads from the untouched
// original, so repeating it with the same inputs gives byte-identical output and a
// result is never filtered twice.

use crate::core_modules::active_set::ActiveKeySet;
use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;

/// Returns a copy of `original` with every non-selected pixel made transparent.
pub fn apply_filter(original: &PixelBuffer, active: &ActiveKeySet) -> PixelBuffer {
    let mut output = original.clone();
    let mut kept = 0usize;
    for chunk in output.bytes_mut().chunks_exact_mut(CHANNELS) {
        let pixel = Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]);
        if retains(&pixel, active) {
            kept += 1;
        } else {
            chunk[3] = 0;
        }
    }

    tracing::debug!(
        width = original.width(),
        height = original.height(),
        active = active.len(),
        kept,
        "recolor pass complete"
    );
    output
}

#[inline]
fn retains(pixel: &Pixel, active: &ActiveKeySet) -> bool {
    pixel.is_visible() && active.contains(&pixel.rgb_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::RgbKey;

    fn red_image() -> PixelBuffer {
        PixelBuffer::filled(4, 3, Pixel::new(255, 0, 0, 255)).unwrap()
    }

    #[test]
    fn active_color_is_kept_verbatim() {
        let original = red_image();
        let active: ActiveKeySet = [RgbKey::new(255, 0, 0)].into_iter().collect();
        assert_eq!(apply_filter(&original, &active), original);
    }

    #[test]
    fn empty_selection_zeroes_alpha_only() {
        let output = apply_filter(&red_image(), &ActiveKeySet::new());
        assert_eq!(output.width(), 4);
        assert_eq!(output.height(), 3);
        assert!(output.pixels().all(|p| p == Pixel::new(255, 0, 0, 0)));
    }

    #[test]
    fn transparent_source_stays_suppressed() {
        let mut original = red_image();
        original.set_pixel(1, 1, Pixel::new(255, 0, 0, 0));
        let active: ActiveKeySet = [RgbKey::new(255, 0, 0)].into_iter().collect();
        let output = apply_filter(&original, &active);
        assert_eq!(output.pixel_at(1, 1), Some(Pixel::new(255, 0, 0, 0)));
        assert_eq!(output.pixel_at(0, 0), Some(Pixel::new(255, 0, 0, 255)));
    }

    #[test]
    fn partial_alpha_is_preserved() {
        let mut original = red_image();
        original.set_pixel(0, 0, Pixel::new(0, 0, 255, 7));
        let active: ActiveKeySet = [RgbKey::new(0, 0, 255)].into_iter().collect();
        let output = apply_filter(&original, &active);
        assert_eq!(output.pixel_at(0, 0), Some(Pixel::new(0, 0, 255, 7)));
        assert_eq!(output.pixel_at(1, 0), Some(Pixel::new(255, 0, 0, 0)));
    }

    #[test]
    fn repeated_passes_are_identical() {
        let mut original = red_image();
        original.set_pixel(2, 2, Pixel::new(10, 20, 30, 40));
        let active: ActiveKeySet = [RgbKey::new(10, 20, 30)].into_iter().collect();
        let first = apply_filter(&original, &active);
        let second = apply_filter(&original, &active);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// A few channel levels so random pixels and random selections overlap.
        fn level() -> impl Strategy<Value = u8> {
            prop::sample::select(vec![0u8, 128, 255])
        }

        fn pixel() -> impl Strategy<Value = Pixel> {
            let alpha = prop_oneof![Just(0u8), Just(255u8), any::<u8>()];
            (level(), level(), level(), alpha).prop_map(|(r, g, b, a)| Pixel::new(r, g, b, a))
        }

        fn buffer() -> impl Strategy<Value = PixelBuffer> {
            (1u32..8, 1u32..8).prop_flat_map(|(width, height)| {
                prop::collection::vec(pixel(), (width * height) as usize).prop_map(move |pixels| {
                    let data = pixels.into_iter().flat_map(<[u8; 4]>::from).collect();
                    PixelBuffer::new(width, height, data).unwrap()
                })
            })
        }

        fn active_set() -> impl Strategy<Value = ActiveKeySet> {
            prop::collection::vec((level(), level(), level()), 0..12)
                .prop_map(|keys| keys.into_iter().map(|(r, g, b)| RgbKey::new(r, g, b)).collect())
        }

        proptest! {
            #[test]
            fn passes_are_deterministic(original in buffer(), active in active_set()) {
                let first = apply_filter(&original, &active);
                let second = apply_filter(&original, &active);
                prop_assert_eq!(first.as_bytes(), second.as_bytes());
            }

            #[test]
            fn only_alpha_of_unselected_pixels_changes(original in buffer(), active in active_set()) {
                let output = apply_filter(&original, &active);
                prop_assert_eq!((output.width(), output.height()), (original.width(), original.height()));
                for (before, after) in original.pixels().zip(output.pixels()) {
                    prop_assert_eq!(after.rgb_key(), before.rgb_key());
                    if before.is_visible() && active.contains(&before.rgb_key()) {
                        prop_assert_eq!(after, before);
                    } else {
                        prop_assert_eq!(after.alpha, 0);
                    }
                }
            }
        }
    }
}
