//! Error types for the color keyer.

use crate::core_modules::color_spec::color_spec::ColorSpecError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong in the library. None of these are fatal to a session.
#[derive(Debug, Error)]
pub enum ColorKeyError {
    /// User color input could not be parsed.
    #[error("invalid color {input:?}: {source}")]
    InvalidColorSpec {
        input: String,
        #[source]
        source: ColorSpecError,
    },

    /// An operation needed an uploaded image and there is none.
    #[error("no image loaded")]
    MissingImage,

    /// An auxiliary asset (gallery image, meta file) could not be loaded.
    #[error("failed to load asset {path}: {reason}")]
    AssetLoad { path: PathBuf, reason: String },

    /// Width, height and byte length of a pixel buffer disagree.
    #[error("invalid dimensions {width}x{height} for {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// The gallery index could not be read.
    #[error("failed to load gallery index {path}: {reason}")]
    GalleryIndex { path: PathBuf, reason: String },

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorKeyError {
    pub fn invalid_spec(input: impl Into<String>, source: ColorSpecError) -> Self {
        Self::InvalidColorSpec {
            input: input.into(),
            source,
        }
    }

    /// Message suitable for a transient user-facing notice.
    pub fn notice_text(&self) -> String {
        match self {
            Self::InvalidColorSpec { .. } => {
                "Please enter a valid color code (e.g., #RRGGBB, #RGB, or 0,0,0).".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ColorKeyError>;
