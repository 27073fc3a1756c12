//! Image to text-animation conversion.
//!
//! One item flows through: source decoding, compositing onto an opaque
//! canvas, glyph mapping, and the codec. [`convert_dir`] runs that for every
//! supported image in a directory.

mod error;
pub mod source;

pub use error::ConvertError;
pub use source::{is_supported, load_source, SourceImage, SUPPORTED_EXTENSIONS};

use std::fs;
use std::path::{Path, PathBuf};

use crate::ascii::{image_to_rows, CharSet, ColorMode, Rgb, DEFAULT_CHAR_ASPECT};
use crate::codec::{encode_frames, CodecError, Container, EncodeOptions};
use crate::compositor::composite_frames;
use crate::signal;

/// Extension given to converted files when none is configured.
pub const DEFAULT_EXTENSION: &str = "ascii";

/// Settings for converting one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Output width in glyphs
    pub width: u32,
    pub color_mode: ColorMode,
    pub charset: CharSet,
    /// Run-length encode rows
    pub compress: bool,
    /// Minimum run length written as a count
    pub threshold: usize,
    /// Store animation frames as deltas
    pub diff: bool,
    /// Color transparent pixels are flattened onto
    pub background: Rgb,
    /// Row height correction for terminal cells
    pub char_aspect: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            width: 80,
            color_mode: ColorMode::default(),
            charset: CharSet::default(),
            compress: true,
            threshold: 3,
            diff: true,
            background: Rgb::new(0, 0, 0),
            char_aspect: DEFAULT_CHAR_ASPECT,
        }
    }
}

impl ConvertOptions {
    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            compress: self.compress,
            threshold: self.threshold,
            diff: self.diff,
            color: self.color_mode.is_color(),
        }
    }
}

/// Turn a decoded source into a container.
///
/// Every frame, including a static image's only frame, is flattened over
/// the background before glyph mapping.
pub fn encode_source(
    source: &SourceImage,
    options: &ConvertOptions,
) -> Result<Container, ConvertError> {
    let (canvases, delays) = composite_frames(
        &source.frames,
        source.width,
        source.height,
        options.background,
    );

    let charset = options.charset.chars();
    let mut frames = Vec::with_capacity(canvases.len());
    for canvas in &canvases {
        let rows = image_to_rows(
            canvas,
            options.width,
            options.char_aspect,
            options.color_mode,
            charset,
        );
        if rows.is_empty() {
            return Err(CodecError::EncodeInput(format!(
                "{}x{} image is too flat for {} columns",
                source.width, source.height, options.width
            ))
            .into());
        }
        frames.push(rows);
    }

    let delays = source.animated.then_some(delays);
    Ok(encode_frames(&frames, delays, options.encode_options())?)
}

/// Convert one image file and write the container to `dst`.
///
/// Nothing is written unless encoding succeeds. The bytes go to a sibling
/// `.part` file that is renamed over `dst`, so a failed write never leaves a
/// truncated output behind.
pub fn convert_file(src: &Path, dst: &Path, options: &ConvertOptions) -> Result<(), ConvertError> {
    let source = load_source(src)?;
    let container = encode_source(&source, options)?;
    let bytes = container.encode()?;

    write_atomic(dst, &bytes)?;
    log::info!(
        "Converted {} -> {} ({} frame(s), {} bytes)",
        src.display(),
        dst.display(),
        source.frames.len(),
        bytes.len()
    );
    Ok(())
}

fn write_atomic(dst: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let mut part = dst.as_os_str().to_os_string();
    part.push(".part");
    let part = PathBuf::from(part);

    let result = fs::write(&part, bytes)
        .map_err(|e| ConvertError::io(&part, e))
        .and_then(|()| fs::rename(&part, dst).map_err(|e| ConvertError::io(dst, e)));
    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}

/// Path of the converted file for `src` inside `output_dir`.
pub fn output_path(src: &Path, output_dir: &Path, extension: &str) -> Option<PathBuf> {
    let mut name = src.file_stem()?.to_os_string();
    name.push(".");
    name.push(extension);
    Some(output_dir.join(name))
}

/// Totals for one [`convert_dir`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Convert every supported image in `images_dir` into `output_dir`.
///
/// Entries are processed in name order. Items that are not files, have an
/// unsupported extension, or (unless `force`) already have an output are
/// skipped. A failing item is logged and counted, and the batch continues.
/// Stops early when an interrupt signal arrives.
///
/// # Errors
/// Only when a directory cannot be read or created.
pub fn convert_dir(
    images_dir: &Path,
    output_dir: &Path,
    extension: &str,
    options: &ConvertOptions,
    force: bool,
) -> Result<BatchReport, ConvertError> {
    fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let mut entries: Vec<PathBuf> = fs::read_dir(images_dir)
        .map_err(|e| ConvertError::io(images_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut report = BatchReport::default();
    for src in entries {
        if signal::interrupted() {
            log::warn!("Interrupted, stopping conversion");
            break;
        }

        if !src.is_file() || !is_supported(&src) {
            log::debug!("Skipping {}: not a supported image", src.display());
            report.skipped += 1;
            continue;
        }
        let Some(dst) = output_path(&src, output_dir, extension) else {
            report.skipped += 1;
            continue;
        };
        if dst.exists() && !force {
            log::info!("Skipping {}: already converted", src.display());
            report.skipped += 1;
            continue;
        }

        log::info!("Converting {}", src.display());
        match convert_file(&src, &dst, options) {
            Ok(()) => report.converted += 1,
            Err(e) => {
                log::error!("Failed to convert {}: {}", src.display(), e);
                report.failed += 1;
            }
        }
    }

    log::info!(
        "Conversion finished: {} converted, {} skipped, {} failed",
        report.converted,
        report.skipped,
        report.failed
    );
    Ok(report)
}
