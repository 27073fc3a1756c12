//! Reading converted files back into displayable frames.

use std::fs;
use std::path::Path;

use super::PlayerError;
use crate::codec::{decode_frames, strip_escapes, CodecError, Container};

/// A decoded item ready for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Shown in the footer (file stem)
    pub name: String,
    /// One entry per frame, rows joined by `\n`; never empty
    pub frames: Vec<String>,
    /// Per-frame durations in milliseconds, when the file has them
    pub delays: Option<Vec<u32>>,
    /// Frames carry color escapes
    pub color: bool,
}

impl Animation {
    /// Drop every color escape, for terminals without true color.
    pub fn monochrome(mut self) -> Self {
        if self.color {
            for frame in &mut self.frames {
                *frame = strip_escapes(frame);
            }
            self.color = false;
        }
        self
    }
}

/// Decode a container's bytes.
pub fn decode_animation(name: &str, bytes: &[u8]) -> Result<Animation, CodecError> {
    let container = Container::decode(bytes)?;
    let frames = decode_frames(&container)
        .into_iter()
        .map(|rows| rows.join("\n"))
        .collect();

    Ok(Animation {
        name: name.to_string(),
        frames,
        delays: container.metadata.delays,
        color: container.metadata.color,
    })
}

/// Read and decode one converted file.
pub fn load_animation(path: &Path) -> Result<Animation, PlayerError> {
    let bytes = fs::read(path).map_err(|source| PlayerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let animation = decode_animation(&name, &bytes)?;
    log::debug!(
        "Loaded {}: {} frame(s), color: {}",
        path.display(),
        animation.frames.len(),
        animation.color
    );
    Ok(animation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Metadata;

    fn container(color: bool, payload: &str, delays: Option<Vec<u32>>) -> Vec<u8> {
        let metadata = Metadata {
            compressed: true,
            diff: delays.is_some(),
            color,
            delays,
        };
        Container::new(metadata, payload.to_string()).encode().unwrap()
    }

    #[test]
    fn test_decode_still() {
        let animation = decode_animation("cat", &container(false, "@4\n.4", None)).unwrap();
        assert_eq!(animation.name, "cat");
        assert_eq!(animation.frames, vec!["@@@@\n....".to_string()]);
        assert_eq!(animation.delays, None);
    }

    #[test]
    fn test_decode_animated_replays_diff() {
        let payload = format!("@4\n.4\n{}\n:4\n=", crate::codec::FRAME_SEPARATOR);
        let bytes = container(false, &payload, Some(vec![50, 60]));
        let animation = decode_animation("dog", &bytes).unwrap();
        assert_eq!(animation.frames, vec!["@@@@\n....", "::::\n...."]);
        assert_eq!(animation.delays, Some(vec![50, 60]));
    }

    #[test]
    fn test_monochrome_strips_escapes() {
        let bytes = container(true, "\x1b[38;2;1;2;3m@\x1b[0m3", None);
        let animation = decode_animation("c", &bytes).unwrap().monochrome();
        assert!(!animation.color);
        assert_eq!(animation.frames, vec!["@@@".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_animation(Path::new("/no/such/file.ascii")).unwrap_err();
        assert!(matches!(err, PlayerError::Read { .. }));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_animation("x", b"garbage"),
            Err(CodecError::Decode(_))
        ));
    }
}
