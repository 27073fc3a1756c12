//! Self-describing container: JSON metadata and payload in one zlib blob.
//!
//! File bytes are `zlib(metadata_json + "\n" + payload)`. Metadata is
//! serialized compactly, so it never contains a newline and the first newline
//! of the inflated text always separates the two parts.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use super::error::CodecError;

/// Describes how the payload was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Rows are run-length encoded
    pub compressed: bool,
    /// Frames after the first are per-row deltas
    pub diff: bool,
    /// Glyphs carry color escapes
    pub color: bool,
    /// Per-frame display durations in milliseconds (animations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delays: Option<Vec<u32>>,
}

/// One converted item: metadata plus payload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub metadata: Metadata,
    pub payload: String,
}

impl Container {
    pub fn new(metadata: Metadata, payload: String) -> Self {
        Self { metadata, payload }
    }

    /// Serialize and compress into the file's bytes.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let meta = serde_json::to_string(&self.metadata)
            .map_err(|e| CodecError::EncodeInput(format!("unserializable metadata: {}", e)))?;

        let uncompressed_size = meta.len() + 1 + self.payload.len();
        let bytes = deflate(&[meta.as_bytes(), b"\n", self.payload.as_bytes()])
            .map_err(CodecError::Compression)?;

        log::debug!(
            "Container encoded: {} bytes -> {} bytes ({}%)",
            uncompressed_size,
            bytes.len(),
            ratio_percent(uncompressed_size, bytes.len())
        );
        Ok(bytes)
    }

    /// Decompress and split a file's bytes.
    ///
    /// # Errors
    /// - [`CodecError::Decode`] for a corrupt stream, non-UTF-8 text, a missing
    ///   metadata separator, or metadata that is not valid JSON
    /// - [`CodecError::Format`] for JSON that lacks a field or has a field of
    ///   the wrong type
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut text = String::new();
        ZlibDecoder::new(bytes)
            .read_to_string(&mut text)
            .map_err(|e| CodecError::Decode(format!("corrupt compressed stream: {}", e)))?;

        let (meta, payload) = text
            .split_once('\n')
            .ok_or_else(|| CodecError::Decode("missing metadata separator".to_string()))?;

        let metadata: Metadata = serde_json::from_str(meta).map_err(|e| match e.classify() {
            Category::Data => CodecError::Format(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                CodecError::Decode(format!("malformed metadata: {}", e))
            }
        })?;

        log::debug!(
            "Container decoded: {} bytes -> {} bytes",
            bytes.len(),
            text.len()
        );
        Ok(Self::new(metadata, payload.to_string()))
    }
}

fn deflate(parts: &[&[u8]]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for part in parts {
        encoder.write_all(part)?;
    }
    encoder.finish()
}

/// Compressed size as a percentage of the original, integer math only.
fn ratio_percent(uncompressed: usize, compressed: usize) -> usize {
    if uncompressed == 0 {
        return 0;
    }
    compressed.saturating_mul(100) / uncompressed
}
