//! Interactive playback of converted files.
//!
//! - [`engine`] - the playing/paused state machine and key bindings
//! - [`session`] - runs the engine for one item against a [`Terminal`]
//! - [`playlist`] - the sorted list of items and wrapping navigation
//! - [`load`] - file bytes to [`Animation`]
//!
//! [`run_viewer`] ties them together: play the current item, then move to
//! the next or previous one until the user quits.

pub mod engine;
mod footer;
pub mod load;
pub mod playlist;
pub mod session;

pub use engine::{KeyCommand, Outcome, PlayState, Playback, Step};
pub use footer::{render_screen, Footer, KEY_LEGEND};
pub use load::{decode_animation, load_animation, Animation};
pub use playlist::Playlist;
pub use session::play;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::codec::CodecError;
use crate::terminal::Terminal;

/// Frame duration used when a file stores none.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(120);

/// Errors from the viewer.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No .{extension} files found in '{}'", dir.display())]
    NoItems { dir: PathBuf, extension: String },

    #[error("None of the {0} item(s) could be loaded")]
    AllItemsFailed(usize),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Viewer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Frame duration for files without stored delays
    pub default_delay: Duration,
    /// Strip color escapes before display
    pub monochrome: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            default_delay: DEFAULT_FRAME_DELAY,
            monochrome: false,
        }
    }
}

/// Play through `playlist` until the user quits.
///
/// An item that fails to load is logged and skipped in the direction the
/// user was moving.
///
/// # Errors
/// - [`PlayerError::AllItemsFailed`] when no item in the playlist loads
/// - [`PlayerError::Terminal`] on terminal I/O failure
pub fn run_viewer<T: Terminal>(
    term: &mut T,
    playlist: &mut Playlist,
    options: &ViewerOptions,
) -> Result<(), PlayerError> {
    let mut direction = Outcome::Next;
    let mut consecutive_failures = 0;

    while let Some(path) = playlist.current() {
        match load_animation(path) {
            Ok(animation) => {
                consecutive_failures = 0;
                let animation = if options.monochrome {
                    animation.monochrome()
                } else {
                    animation
                };

                log::info!("Playing {}", path.display());
                direction = play(term, &animation, options.default_delay)?;
                if direction == Outcome::Quit {
                    log::info!("Viewer quit");
                    return Ok(());
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                consecutive_failures += 1;
                if consecutive_failures >= playlist.len() {
                    return Err(PlayerError::AllItemsFailed(playlist.len()));
                }
            }
        }

        match direction {
            Outcome::Prev => playlist.prev(),
            _ => playlist.next(),
        }
    }

    Ok(())
}
