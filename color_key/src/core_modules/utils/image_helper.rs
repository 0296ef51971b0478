pub mod image_helper {
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::error::Result;
    use base64::{Engine, engine::general_purpose::STANDARD};
    use image::ImageEncoder;
    use std::path::Path;

    pub const EXPORT_SUFFIX: &str = "_filtered";

    /// Decodes any raster format the `image` crate recognizes into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw())
    }

    pub fn load(path: &Path) -> Result<PixelBuffer> {
        let bytes = std::fs::read(path)?;
        decode(&bytes)
    }

    pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png);
        encoder.write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(png)
    }

    pub fn save(path: &Path, buffer: &PixelBuffer) -> Result<()> {
        let png = encode_png(buffer)?;
        std::fs::write(path, png)?;
        Ok(())
    }

    /// `data:image/png;base64,...` for the buffer.
    pub fn png_data_uri(buffer: &PixelBuffer) -> Result<String> {
        let png = encode_png(buffer)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    /// Download name for a filtered image: the upload's base name (up to the first
    /// `.`) followed by `_filtered.png`.
    pub fn export_file_name(upload_name: &str) -> String {
        let file_name = Path::new(upload_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(upload_name);
        let base = file_name.split('.').next().unwrap_or_default();
        format!("{base}{EXPORT_SUFFIX}.png")
    }
}

#[cfg(test)]
mod tests {
    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::PixelBuffer;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::blank(width, height).unwrap();
        let mut intensity = 0u8;
        for y in 0..height {
            for x in 0..width {
                buffer.set_pixel(x, y, Pixel::new(intensity, 255 - intensity, 7, intensity));
                intensity = intensity.wrapping_add(13);
            }
        }
        buffer
    }

    #[test]
    fn png_survives_encode_and_decode() {
        let buffer = gradient(17, 9);
        let png = encode_png(&buffer).expect("Error encoding PNG.");
        assert_eq!(decode(&png).expect("Error decoding PNG."), buffer);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient_file.png");
        let buffer = gradient(32, 4);
        save(&path, &buffer).expect("Error Saving File.");
        assert_eq!(load(&path).unwrap(), buffer);
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let uri = png_data_uri(&gradient(2, 2)).unwrap();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode(b"definitely not an image").is_err());
    }

    #[test]
    fn export_names() {
        assert_eq!(export_file_name("cat.png"), "cat_filtered.png");
        assert_eq!(export_file_name("photo.final.jpeg"), "photo_filtered.png");
        assert_eq!(export_file_name("/tmp/uploads/logo.gif"), "logo_filtered.png");
        assert_eq!(export_file_name("noext"), "noext_filtered.png");
    }
}
