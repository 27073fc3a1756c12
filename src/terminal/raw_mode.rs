//! Raw mode and alternate screen handling with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the viewer owns the terminal; read by the panic hook.
pub(crate) static TERMINAL_TAKEN: AtomicBool = AtomicBool::new(false);

/// Owns raw mode, the alternate screen and the hidden cursor for as long
/// as it lives. The terminal comes back on drop, on
/// [`RawModeGuard::exit`], or when a panic unwinds past it.
pub struct RawModeGuard {
    restored: bool,
}

impl RawModeGuard {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Fails if raw mode or the alternate screen cannot be entered. A
    /// partial setup is undone first.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        TERMINAL_TAKEN.store(true, Ordering::SeqCst);

        crossterm::execute!(io::stdout(), EnterAlternateScreen, Hide).map_err(|e| {
            release_quietly();
            e
        })?;

        Ok(Self { restored: false })
    }

    /// Give the terminal back now and report failures. Drop does nothing
    /// afterwards.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        TERMINAL_TAKEN.store(false, Ordering::SeqCst);
        crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.restored {
            self.restored = true;
            release_quietly();
        }
    }
}

fn release_quietly() {
    TERMINAL_TAKEN.store(false, Ordering::SeqCst);
    let _ = crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Chain a hook that hands the terminal back before the panic message
/// prints. Installed at most once per process.
pub(crate) fn install_panic_hook() {
    static INSTALLED: AtomicBool = AtomicBool::new(false);
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if TERMINAL_TAKEN.load(Ordering::SeqCst) {
            release_quietly();
        }
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both guard tests need a real TTY and pass trivially without one

    #[test]
    fn test_guard_releases_on_drop() {
        match RawModeGuard::enter() {
            Ok(guard) => {
                assert!(TERMINAL_TAKEN.load(Ordering::SeqCst));
                drop(guard);
                assert!(!TERMINAL_TAKEN.load(Ordering::SeqCst));
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
                assert!(!TERMINAL_TAKEN.load(Ordering::SeqCst));
            }
        }
    }

    #[test]
    fn test_exit_is_idempotent() {
        if let Ok(mut guard) = RawModeGuard::enter() {
            guard.exit().expect("first exit restores");
            guard.exit().expect("second exit is a no-op");
            assert!(!TERMINAL_TAKEN.load(Ordering::SeqCst));
        }
    }

    #[test]
    fn test_panic_hook_installs_once() {
        install_panic_hook();
        install_panic_hook();
    }
}
