//! Frame layout inside the payload text.
//!
//! A payload is a list of frames, each frame its rows joined by `\n`, with a
//! separator line between frames. Frames of different heights are padded by
//! prepending blank rows; the same side is used when encoding and decoding.

/// Line placed between frames. Contains letters absent from every glyph
/// palette, so a row can never be mistaken for it.
pub const FRAME_SEPARATOR: &str = "<<ascii-reel:frame>>";

/// Join frames (each a list of rows) into payload text.
pub fn join_frames(frames: &[Vec<String>]) -> String {
    let separator = format!("\n{}\n", FRAME_SEPARATOR);
    frames
        .iter()
        .map(|rows| rows.join("\n"))
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Split payload text back into frames of rows.
///
/// Always yields at least one frame; an empty payload is one frame holding
/// one empty row.
pub fn split_frames(payload: &str) -> Vec<Vec<String>> {
    let mut frames = Vec::new();
    let mut current = Vec::new();

    for line in payload.split('\n') {
        if line == FRAME_SEPARATOR {
            frames.push(std::mem::take(&mut current));
        } else {
            current.push(line.to_string());
        }
    }
    frames.push(current);

    frames
}

/// Pad every frame to the tallest frame's height by prepending empty rows.
pub fn pad_frames(frames: &mut [Vec<String>]) {
    let height = frames.iter().map(Vec::len).max().unwrap_or(0);
    for rows in frames.iter_mut() {
        let missing = height - rows.len();
        if missing > 0 {
            rows.splice(0..0, std::iter::repeat(String::new()).take(missing));
        }
    }
}
