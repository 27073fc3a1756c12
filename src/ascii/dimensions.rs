//! Character grid dimensions for a source image.

/// Default height-to-width correction for terminal cells.
/// Terminal characters are roughly twice as tall as wide, so rows are
/// squeezed to a little over half the pixel aspect ratio.
pub const DEFAULT_CHAR_ASPECT: f64 = 0.55;

/// Calculate the character grid for an image rendered `target_width` glyphs wide.
///
/// The height keeps the source aspect ratio, scaled by `char_aspect` to
/// compensate for tall terminal cells, and is truncated toward zero.
///
/// # Returns
/// A tuple of (columns, rows). Rows may be zero for extremely wide images;
/// callers reject such grids.
///
/// # Example
/// ```ignore
/// // 100x50 image at 40 columns: 40 * 0.5 * 0.55 = 11 rows
/// assert_eq!(calculate_dimensions(100, 50, 40, DEFAULT_CHAR_ASPECT), (40, 11));
/// ```
pub fn calculate_dimensions(
    img_width: u32,
    img_height: u32,
    target_width: u32,
    char_aspect: f64,
) -> (u32, u32) {
    if img_width == 0 || img_height == 0 || target_width == 0 {
        return (target_width, 0);
    }

    let aspect = f64::from(img_height) / f64::from(img_width);
    let rows = (f64::from(target_width) * aspect * char_aspect).max(0.0) as u32;
    (target_width, rows)
}
