// THEORY:
// The `color_spec` module turns whatever a user types into a swatch field into a
// canonical color. Two notations are accepted:
//
// - Channel lists: "R,G,B" or "R,G,B,A", decimal, each 0..=255.
// - Hex: 1, 2, 3, 6 or 8 digits with an optional leading '#'.
//     f        -> ffffff   (one digit repeated six times)
//     12       -> 121212   (pair repeated three times)
//     abc      -> aabbcc   (each digit doubled)
//     aabbcc   -> aabbcc
//     00ff0080 -> 00ff00 with alpha 0x80
//
// Whatever the notation, the result is a `ParsedColor` whose `rgb_key()` is the
// identity used for matching. Alpha is carried along for display only.
// Malformed input is an error value, never a panic.

pub mod color_spec {
    use crate::core_modules::pixel::pixel::{Channel, RgbKey};

    const DEFAULT_ALPHA: Channel = 255;

    /// Why a color spec was rejected.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum ColorSpecError {
        #[error("empty color spec")]
        Empty,
        #[error("hex color must have 1, 2, 3, 6 or 8 digits, got {0}")]
        InvalidLength(usize),
        #[error("invalid hex digits")]
        InvalidHex,
        #[error("channel {0:?} is not a decimal integer")]
        InvalidChannel(String),
        #[error("channel value {0} is outside 0..=255")]
        ChannelOutOfRange(i64),
        #[error("expected at least 3 channels, got {0}")]
        TooFewChannels(usize),
    }

    /// A color spec resolved to its canonical form.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ParsedColor {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
        pub alpha: Channel,
        /// Lowercase `#rrggbb`.
        pub hex: String,
    }

    impl ParsedColor {
        fn from_channels(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            let hex = RgbKey::new(red, green, blue).to_hex();
            Self {
                red,
                green,
                blue,
                alpha,
                hex,
            }
        }

        pub fn rgb_key(&self) -> RgbKey {
            RgbKey::new(self.red, self.green, self.blue)
        }

        /// Display identity including alpha: `"r,g,b,alpha"`.
        pub fn key(&self) -> String {
            format!("{},{},{},{}", self.red, self.green, self.blue, self.alpha)
        }
    }

    /// Parses a channel list or hex color spec. Whitespace is only allowed around
    /// the channels of a list; a hex spec must be exactly its digits.
    pub fn parse(input: &str) -> Result<ParsedColor, ColorSpecError> {
        if input.trim().is_empty() {
            return Err(ColorSpecError::Empty);
        }
        if input.contains(',') {
            parse_channels(input)
        } else {
            parse_hex(input.strip_prefix('#').unwrap_or(input))
        }
    }

    fn parse_channels(input: &str) -> Result<ParsedColor, ColorSpecError> {
        let channels = input
            .split(',')
            .map(|part| {
                let part = part.trim();
                let value = part
                    .parse::<i64>()
                    .map_err(|_| ColorSpecError::InvalidChannel(part.to_string()))?;
                Channel::try_from(value).map_err(|_| ColorSpecError::ChannelOutOfRange(value))
            })
            .collect::<Result<Vec<Channel>, ColorSpecError>>()?;

        match channels[..] {
            [red, green, blue] => Ok(ParsedColor::from_channels(red, green, blue, DEFAULT_ALPHA)),
            [red, green, blue, alpha, ..] => Ok(ParsedColor::from_channels(red, green, blue, alpha)),
            _ => Err(ColorSpecError::TooFewChannels(channels.len())),
        }
    }

    fn parse_hex(digits: &str) -> Result<ParsedColor, ColorSpecError> {
        let length = digits.chars().count();
        let (rgb, alpha) = match length {
            1 => (digits.repeat(6), None),
            2 => (digits.repeat(3), None),
            3 => (digits.chars().flat_map(|c| [c, c]).collect::<String>(), None),
            6 => (digits.to_string(), None),
            8 if !digits.is_ascii() => return Err(ColorSpecError::InvalidHex),
            8 => (digits[..6].to_string(), Some(&digits[6..])),
            _ => return Err(ColorSpecError::InvalidLength(length)),
        };
        if !rgb.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorSpecError::InvalidHex);
        }

        let byte_at = |offset: usize| {
            Channel::from_str_radix(&rgb[offset..offset + 2], 16).map_err(|_| ColorSpecError::InvalidHex)
        };
        let alpha = match alpha {
            Some(pair) if pair.chars().all(|c| c.is_ascii_hexdigit()) => {
                Channel::from_str_radix(pair, 16).map_err(|_| ColorSpecError::InvalidHex)?
            }
            Some(_) => return Err(ColorSpecError::InvalidHex),
            None => DEFAULT_ALPHA,
        };

        Ok(ParsedColor::from_channels(byte_at(0)?, byte_at(2)?, byte_at(4)?, alpha))
    }
}
