//! The on-disk text animation format.
//!
//! Encoding runs leaves first:
//!
//! 1. [`line`] - escape-aware run-length coding of one row
//! 2. [`payload`] - frames joined with a separator line, blank-row padding
//! 3. [`diff`] - per-row deltas against the previous frame
//! 4. [`container`] - metadata and payload in one zlib blob
//! 5. [`animation`] - all of the above for one item
//!
//! Decoding is the mirror image: container, split frames, unpack rows,
//! replay deltas.

pub mod animation;
pub mod container;
pub mod diff;
mod error;
pub mod line;
pub mod payload;

pub use animation::{decode_frames, encode_frames, EncodeOptions};
pub use container::{Container, Metadata};
pub use diff::{diff_decode, diff_encode, DIFF_SENTINEL};
pub use error::CodecError;
pub use line::{compress, strip_escapes, unpack, MAX_RUN};
pub use payload::{join_frames, pad_frames, split_frames, FRAME_SEPARATOR};
