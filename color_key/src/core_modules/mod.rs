pub mod active_set;
pub mod color_spec;
pub mod custom_colors;
pub mod palette;
pub mod pixel;
pub mod pixel_buffer;
pub mod recolor;
pub mod rings;
pub mod utils;
