// THEORY:
// The `Pixel` module is the smallest unit the color keyer works with. A `Pixel` is
// a "dumb" RGBA container read straight out of a pixel buffer. Its only job beyond
// holding bytes is to hand out its `RgbKey`, the identity used everywhere a color
// is compared: the active swatch set, the custom color list, and the per-pixel
// filter.
//
// Key principles:
// 1) RGB identity: alpha never takes part in a key. Two colors that differ only in
//    alpha are the same swatch.
// 2) Textual form: a key renders as "r,g,b" (decimal, no spaces) and parses back
//    from the same text. This is the form persisted in storage.
// 3) Alpha as visibility: the filter only asks whether a source pixel's alpha is
//    zero; any non-zero alpha is considered visible and is preserved verbatim.

pub mod pixel {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::str::FromStr;

    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// The RGB identity of this pixel, ignoring alpha.
        pub fn rgb_key(&self) -> RgbKey {
            RgbKey::new(self.red, self.green, self.blue)
        }

        /// True when the pixel carries any opacity at all.
        pub fn is_visible(&self) -> bool {
            self.alpha > 0
        }

        /// The same color with alpha forced to zero.
        pub fn suppressed(&self) -> Self {
            Pixel { alpha: 0, ..*self }
        }
    }

    /// A byte slice that is not exactly one pixel long.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    #[error("expected {CHANNELS} bytes for a pixel, got {0}")]
    pub struct PixelLengthError(pub usize);

    impl TryFrom<&[Byte]> for Pixel {
        type Error = PixelLengthError;

        fn try_from(bytes: &[Byte]) -> Result<Self, Self::Error> {
            match bytes {
                [red, green, blue, alpha] => Ok(Pixel::new(*red, *green, *blue, *alpha)),
                _ => Err(PixelLengthError(bytes.len())),
            }
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }

    /// The identity of a color for set membership: its red, green and blue channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct RgbKey {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    impl RgbKey {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            RgbKey { red, green, blue }
        }

        /// Lowercase `#rrggbb` form of the key.
        pub fn to_hex(&self) -> String {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        }
    }

    impl fmt::Display for RgbKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{},{},{}", self.red, self.green, self.blue)
        }
    }

    /// Error for text that is not a `"r,g,b"` key.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("malformed rgb key: {0:?}")]
    pub struct MalformedRgbKey(pub String);

    impl FromStr for RgbKey {
        type Err = MalformedRgbKey;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let malformed = || MalformedRgbKey(s.to_string());
            let mut channels = s.split(',').map(|part| part.trim().parse::<Channel>());
            let (Some(Ok(red)), Some(Ok(green)), Some(Ok(blue)), None) =
                (channels.next(), channels.next(), channels.next(), channels.next())
            else {
                return Err(malformed());
            };
            Ok(RgbKey::new(red, green, blue))
        }
    }

    impl Serialize for RgbKey {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for RgbKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn key_ignores_alpha() {
        let opaque = Pixel::new(12, 34, 56, 255);
        let faint = Pixel::new(12, 34, 56, 1);
        assert_eq!(opaque.rgb_key(), faint.rgb_key());
        assert_eq!(opaque.rgb_key().to_string(), "12,34,56");
    }

    #[test]
    fn key_parses_its_own_text() {
        let key = RgbKey::new(255, 0, 128);
        assert_eq!(key.to_string().parse::<RgbKey>(), Ok(key));
        assert_eq!(key.to_hex(), "#ff0080");
    }

    #[test]
    fn key_rejects_wrong_shapes() {
        assert!("1,2".parse::<RgbKey>().is_err());
        assert!("1,2,3,4".parse::<RgbKey>().is_err());
        assert!("1,2,256".parse::<RgbKey>().is_err());
        assert!("a,b,c".parse::<RgbKey>().is_err());
    }

    #[test]
    fn pixel_from_slice_checks_length() {
        let bytes = [1u8, 2, 3, 4];
        assert_eq!(Pixel::try_from(&bytes[..]), Ok(Pixel::new(1, 2, 3, 4)));
        let err = Pixel::try_from(&bytes[..3]).unwrap_err();
        assert_eq!(err, PixelLengthError(3));
        assert_eq!(err.to_string(), "expected 4 bytes for a pixel, got 3");
    }

    #[test]
    fn suppressed_keeps_rgb() {
        let pixel = Pixel::new(9, 8, 7, 200).suppressed();
        assert_eq!(<[u8; 4]>::from(pixel), [9, 8, 7, 0]);
        assert!(!pixel.is_visible());
    }

    #[test]
    fn key_serializes_as_string() {
        let keys = vec![RgbKey::new(0, 0, 0), RgbKey::new(1, 2, 3)];
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"["0,0,0","1,2,3"]"#);
        let back: Vec<RgbKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, keys);
    }
}
