//! Drives one [`Playback`] against a terminal.

use std::io;
use std::time::{Duration, Instant};

use super::engine::{Outcome, Playback, Step};
use super::footer::{render_screen, Footer};
use super::load::Animation;
use crate::terminal::Terminal;

/// Play `animation` until the user quits or moves to another item.
///
/// The frame deadline is absolute: a key the player ignores does not
/// restart it.
///
/// # Errors
/// Only terminal I/O errors.
pub fn play<T: Terminal>(
    term: &mut T,
    animation: &Animation,
    default_delay: Duration,
) -> io::Result<Outcome> {
    let mut playback = Playback::new(
        animation.frames.len(),
        animation.delays.clone(),
        default_delay,
    );

    draw(term, animation, &playback)?;
    let mut deadline = next_deadline(&playback);

    loop {
        let timeout = deadline.map(|d| d.saturating_duration_since(Instant::now()));
        let step = match term.read_key(timeout)? {
            Some(key) => playback.on_key(key),
            None => playback.on_timeout(),
        };

        match step {
            Step::Exit(outcome) => return Ok(outcome),
            Step::Redraw => {
                draw(term, animation, &playback)?;
                deadline = next_deadline(&playback);
            }
            Step::Rearm => deadline = next_deadline(&playback),
            Step::Idle => {}
        }
    }
}

fn next_deadline(playback: &Playback) -> Option<Instant> {
    playback.wait_duration().map(|d| Instant::now() + d)
}

fn draw<T: Terminal>(term: &mut T, animation: &Animation, playback: &Playback) -> io::Result<()> {
    let frame = animation
        .frames
        .get(playback.index())
        .map_or("", String::as_str);
    let footer = Footer {
        name: &animation.name,
        index: playback.index(),
        total: playback.total(),
    };
    term.clear_and_print(&render_screen(frame, &footer))
}
