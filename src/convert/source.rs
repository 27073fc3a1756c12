//! Source image decoding.
//!
//! Static formats go through the `image` crate and come back as a single
//! full-canvas frame. GIFs are read frame by frame with the `gif` crate so
//! offsets, disposal rules and delays survive for the compositor.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::error::ConvertError;
use crate::compositor::{Disposal, RawFrame, DEFAULT_DELAY_MS};

/// File extensions accepted as conversion input (lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// A decoded source: logical screen size plus raw frames.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<RawFrame>,
    /// Came from an animated container (GIF), even if it has one frame
    pub animated: bool,
}

/// Lowercased extension of `path`, if any.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether `path` has an extension the converter can read.
pub fn is_supported(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether `path` is read through the animated path.
pub fn is_gif(path: &Path) -> bool {
    extension_of(path).as_deref() == Some("gif")
}

/// Decode `path`, choosing the animated path for GIFs.
pub fn load_source(path: &Path) -> Result<SourceImage, ConvertError> {
    let source = if is_gif(path) {
        load_gif(path)?
    } else {
        load_static(path)?
    };

    if source.width == 0 || source.height == 0 {
        return Err(ConvertError::EmptySource(format!(
            "{} is {}x{}",
            path.display(),
            source.width,
            source.height
        )));
    }
    if source.frames.is_empty() {
        return Err(ConvertError::EmptySource(format!(
            "{} has no frames",
            path.display()
        )));
    }

    log::debug!(
        "Loaded {}: {}x{}, {} frame(s)",
        path.display(),
        source.width,
        source.height,
        source.frames.len()
    );
    Ok(source)
}

/// Decode a single-frame image into one RGBA frame at the origin.
pub fn load_static(path: &Path) -> Result<SourceImage, ConvertError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(SourceImage {
        width,
        height,
        frames: vec![RawFrame::full(rgba.into_raw(), width, height)],
        animated: false,
    })
}

/// Decode every frame of a GIF, keeping offsets, disposal and delays.
pub fn load_gif(path: &Path) -> Result<SourceImage, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;

    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(BufReader::new(file))?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let mut frames = Vec::new();

    while let Some(frame) = decoder.read_next_frame()? {
        frames.push(RawFrame {
            pixels: frame.buffer.to_vec(),
            width: u32::from(frame.width),
            height: u32::from(frame.height),
            left: u32::from(frame.left),
            top: u32::from(frame.top),
            disposal: disposal_from_gif(frame.dispose),
            delay_ms: delay_from_centis(frame.delay),
        });
    }

    Ok(SourceImage {
        width,
        height,
        frames,
        animated: true,
    })
}

fn disposal_from_gif(method: gif::DisposalMethod) -> Disposal {
    match method {
        gif::DisposalMethod::Any | gif::DisposalMethod::Keep => Disposal::None,
        gif::DisposalMethod::Background => Disposal::RestoreBackground,
        gif::DisposalMethod::Previous => Disposal::RestorePrevious,
    }
}

/// GIF delays are stored in hundredths of a second; 0 means "unspecified".
fn delay_from_centis(centis: u16) -> u32 {
    match centis {
        0 => DEFAULT_DELAY_MS,
        n => u32::from(n) * 10,
    }
}
