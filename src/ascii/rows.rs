//! Canvas to glyph rows.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::dimensions::calculate_dimensions;
use super::mapping::{push_glyph, ColorMode, Rgb};

/// Resize an opaque canvas to the character grid and map every pixel to a glyph.
///
/// Alpha is ignored; canvases coming out of the compositor are fully opaque.
///
/// # Returns
/// One string per row, top to bottom. Empty when the grid has no rows.
pub fn image_to_rows(
    canvas: &RgbaImage,
    width: u32,
    char_aspect: f64,
    mode: ColorMode,
    charset: &[char],
) -> Vec<String> {
    let (cols, rows) = calculate_dimensions(canvas.width(), canvas.height(), width, char_aspect);
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let resized = imageops::resize(canvas, cols, rows, FilterType::CatmullRom);
    let bytes_per_glyph = if mode.is_color() { 24 } else { 1 };

    resized
        .rows()
        .map(|row| {
            let mut line = String::with_capacity(cols as usize * bytes_per_glyph);
            for pixel in row {
                let [r, g, b, _] = pixel.0;
                push_glyph(&mut line, Rgb::new(r, g, b), mode, charset);
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{DEFAULT_CHAR_ASPECT, STANDARD_CHARSET};
    use image::Rgba;

    #[test]
    fn test_rows_match_grid() {
        let canvas = RgbaImage::from_pixel(100, 50, Rgba([0, 0, 0, 255]));
        let rows = image_to_rows(&canvas, 40, DEFAULT_CHAR_ASPECT, ColorMode::Grayscale, STANDARD_CHARSET);
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|r| r == &"@".repeat(40)));
    }

    #[test]
    fn test_rows_colorized() {
        let canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let rows = image_to_rows(&canvas, 2, 1.0, ColorMode::Color, STANDARD_CHARSET);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "\x1b[38;2;255;255;255m \x1b[0m".repeat(2));
    }

    #[test]
    fn test_rows_empty_for_flat_image() {
        let canvas = RgbaImage::from_pixel(1000, 1, Rgba([0, 0, 0, 255]));
        let rows = image_to_rows(&canvas, 80, DEFAULT_CHAR_ASPECT, ColorMode::Grayscale, STANDARD_CHARSET);
        assert!(rows.is_empty());
    }
}
