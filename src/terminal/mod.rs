//! Terminal access for playback - key input, full-screen output, raw mode.

mod backend;
mod raw_mode;

pub use backend::CrosstermTerminal;
pub use raw_mode::RawModeGuard;

use std::io;
use std::time::Duration;

/// One keystroke as seen by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C, or a termination signal delivered while waiting
    Interrupt,
    /// Any key without a character (arrows, function keys)
    Other,
}

/// What the player needs from a terminal.
pub trait Terminal {
    /// Wait for one keystroke.
    ///
    /// `None` waits forever. Returns `Ok(None)` when the timeout elapses
    /// without a key.
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>>;

    /// Clear the screen and write `text` from the top-left corner.
    fn clear_and_print(&mut self, text: &str) -> io::Result<()>;
}
