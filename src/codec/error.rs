//! Codec error types

/// Errors raised while encoding or decoding one converted item.
///
/// Every variant is local to a single item; callers processing many items
/// log the failure and move on.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Corrupt or truncated stream, missing separator, malformed metadata
    #[error("decode error: {0}")]
    Decode(String),

    /// Input rejected before anything was written
    #[error("invalid encoder input: {0}")]
    EncodeInput(String),

    /// Metadata parsed but a field is missing or has the wrong type
    #[error("format error: {0}")]
    Format(String),

    /// The compressor failed while writing into memory
    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),
}
