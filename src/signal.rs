//! Process-wide interrupt flag fed by SIGINT/SIGTERM.
//!
//! Batch conversion checks it between items; the terminal backend turns it
//! into a quit key while playing.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Check if an interrupt or termination signal has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Set up the signal handler.
///
/// This should be called once at program startup.
pub fn install_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        INTERRUPTED.store(true, Ordering::SeqCst);
        log::warn!("Received interrupt, shutting down...");
    })
}
