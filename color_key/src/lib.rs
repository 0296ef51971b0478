// THEORY:
// This file is the entry point for the `color_key` library crate. It exposes the
// `FilterSession` and its data types as the high-level interface for palette-based
// color keying, plus the two smaller tools that ship alongside it: the ring-pattern
// generator and the tool gallery loader.
//
// The low-level pieces (`core_modules`) stay public so callers that only need the
// parser or the filter pass can use them directly, without a session or a store.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod gallery;
pub mod session;
pub mod store;
pub mod swatches;

pub use config::SessionConfig;
pub use core_modules::active_set::{ActiveKeySet, DragGesture};
pub use core_modules::color_spec::color_spec::{ColorSpecError, ParsedColor, parse};
pub use core_modules::custom_colors::CustomColorList;
pub use core_modules::pixel::pixel::{Pixel, RgbKey};
pub use core_modules::pixel_buffer::PixelBuffer;
pub use core_modules::recolor::apply_filter;
pub use core_modules::rings::{RingConfig, RingImage, generate_rings};
pub use error::{ColorKeyError, Result};
pub use session::{FilterSession, SessionEvent, SessionState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
