//! Crossterm-backed [`Terminal`] used by the viewer.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use super::raw_mode::RawModeGuard;
use super::{Key, Terminal};
use crate::signal;

/// Longest single blocking poll, so signals are noticed promptly.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Full-screen terminal in raw mode on the alternate screen.
pub struct CrosstermTerminal {
    guard: RawModeGuard,
    out: Stdout,
}

impl CrosstermTerminal {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Returns an error if raw mode or the alternate screen cannot be
    /// entered; the terminal is left as it was.
    pub fn new() -> io::Result<Self> {
        let guard = RawModeGuard::enter()?;
        Ok(Self {
            guard,
            out: io::stdout(),
        })
    }

    /// Give the terminal back. Dropping does the same, ignoring errors.
    pub fn restore(&mut self) -> io::Result<()> {
        self.guard.exit()
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>> {
        let deadline = timeout.map(|t| Instant::now() + t);

        loop {
            if signal::interrupted() {
                return Ok(Some(Key::Interrupt));
            }

            // Poll at least once, even when the deadline has already passed
            let slice = deadline.map_or(POLL_SLICE, |d| {
                d.saturating_duration_since(Instant::now()).min(POLL_SLICE)
            });
            if event::poll(slice)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(key) = map_key_event(key) {
                        return Ok(Some(key));
                    }
                }
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
        }
    }

    fn clear_and_print(&mut self, text: &str) -> io::Result<()> {
        // Raw mode disables output post-processing, so line feeds need an
        // explicit carriage return
        let text = text.replace('\n', "\r\n");
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(MoveTo(0, 0))?;
        self.out.queue(Print(text))?;
        self.out.flush()
    }
}

/// Translate a crossterm key event. Only presses produce a key.
pub(crate) fn map_key_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let key = match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Key::Interrupt
        }
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_map_plain_chars() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Key::Char('q'))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Key::Char(' '))
        );
    }

    #[test]
    fn test_map_ctrl_c_to_interrupt() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Interrupt)
        );
    }

    #[test]
    fn test_map_other_keys() {
        assert_eq!(
            map_key_event(press(KeyCode::Left, KeyModifiers::NONE)),
            Some(Key::Other)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let mut event = press(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(event), None);
    }

    #[test]
    fn test_crossterm_terminal_needs_tty() {
        match CrosstermTerminal::new() {
            Ok(mut term) => {
                term.restore().expect("Should restore terminal");
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
            }
        }
    }
}
