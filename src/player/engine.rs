//! Playback state machine.
//!
//! Pure state: no terminal, no clock. The session loop asks how long to
//! wait, then feeds back either a key or a timeout and acts on the [`Step`].

use std::time::Duration;

use crate::terminal::Key;

/// Whether frames advance on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// A key the player responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    NextItem,
    PrevItem,
    TogglePause,
    PrevFrame,
    NextFrame,
}

impl KeyCommand {
    /// Map a keystroke, ignoring case. Interrupts quit.
    pub fn from_key(key: Key) -> Option<Self> {
        let c = match key {
            Key::Interrupt => return Some(KeyCommand::Quit),
            Key::Other => return None,
            Key::Char(c) => c.to_ascii_lowercase(),
        };

        match c {
            'q' => Some(KeyCommand::Quit),
            'd' => Some(KeyCommand::NextItem),
            'a' => Some(KeyCommand::PrevItem),
            ' ' => Some(KeyCommand::TogglePause),
            'x' => Some(KeyCommand::PrevFrame),
            'c' => Some(KeyCommand::NextFrame),
            _ => None,
        }
    }
}

/// How playback of one item ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Next,
    Prev,
}

/// What the session loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Draw the current frame and restart the frame timer
    Redraw,
    /// Restart the frame timer without drawing
    Rearm,
    /// Nothing changed; keep waiting for the same deadline
    Idle,
    Exit(Outcome),
}

/// Playback position and mode for one animation.
#[derive(Debug, Clone)]
pub struct Playback {
    index: usize,
    total: usize,
    state: PlayState,
    delays: Option<Vec<u32>>,
    default_delay: Duration,
}

impl Playback {
    /// Start playing `total` frames from the first one.
    pub fn new(total: usize, delays: Option<Vec<u32>>, default_delay: Duration) -> Self {
        Self {
            index: 0,
            total,
            state: PlayState::Playing,
            delays,
            default_delay,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// How long to wait for a key. `None` while paused.
    ///
    /// A frame without a stored delay, or with a stored delay of zero,
    /// falls back to the default.
    pub fn wait_duration(&self) -> Option<Duration> {
        match self.state {
            PlayState::Paused => None,
            PlayState::Playing => Some(
                self.delays
                    .as_ref()
                    .and_then(|d| d.get(self.index))
                    .filter(|ms| **ms > 0)
                    .map_or(self.default_delay, |ms| Duration::from_millis(u64::from(*ms))),
            ),
        }
    }

    pub fn on_key(&mut self, key: Key) -> Step {
        let Some(command) = KeyCommand::from_key(key) else {
            return Step::Idle;
        };

        match command {
            KeyCommand::Quit => Step::Exit(Outcome::Quit),
            KeyCommand::NextItem => Step::Exit(Outcome::Next),
            KeyCommand::PrevItem => Step::Exit(Outcome::Prev),
            KeyCommand::TogglePause => {
                self.state = match self.state {
                    PlayState::Playing => PlayState::Paused,
                    PlayState::Paused => PlayState::Playing,
                };
                Step::Rearm
            }
            KeyCommand::PrevFrame => {
                self.state = PlayState::Paused;
                self.step_back();
                Step::Redraw
            }
            KeyCommand::NextFrame => {
                self.state = PlayState::Paused;
                self.step_forward();
                Step::Redraw
            }
        }
    }

    /// The wait elapsed without a key.
    pub fn on_timeout(&mut self) -> Step {
        match self.state {
            PlayState::Paused => Step::Idle,
            PlayState::Playing if self.total > 1 => {
                self.step_forward();
                Step::Redraw
            }
            PlayState::Playing => Step::Rearm,
        }
    }

    fn step_forward(&mut self) {
        if self.total > 0 {
            self.index = (self.index + 1) % self.total;
        }
    }

    fn step_back(&mut self) {
        if self.total > 0 {
            self.index = (self.index + self.total - 1) % self.total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Duration = Duration::from_millis(120);

    #[test]
    fn test_key_commands_ignore_case() {
        assert_eq!(KeyCommand::from_key(Key::Char('Q')), Some(KeyCommand::Quit));
        assert_eq!(KeyCommand::from_key(Key::Char('d')), Some(KeyCommand::NextItem));
        assert_eq!(KeyCommand::from_key(Key::Char('A')), Some(KeyCommand::PrevItem));
        assert_eq!(KeyCommand::from_key(Key::Char(' ')), Some(KeyCommand::TogglePause));
        assert_eq!(KeyCommand::from_key(Key::Char('X')), Some(KeyCommand::PrevFrame));
        assert_eq!(KeyCommand::from_key(Key::Char('c')), Some(KeyCommand::NextFrame));
        assert_eq!(KeyCommand::from_key(Key::Interrupt), Some(KeyCommand::Quit));
        assert_eq!(KeyCommand::from_key(Key::Char('z')), None);
        assert_eq!(KeyCommand::from_key(Key::Other), None);
    }

    #[test]
    fn test_starts_playing_at_first_frame() {
        let playback = Playback::new(3, None, DEFAULT);
        assert_eq!(playback.index(), 0);
        assert_eq!(playback.state(), PlayState::Playing);
        assert_eq!(playback.wait_duration(), Some(DEFAULT));
    }

    #[test]
    fn test_wait_uses_stored_delay() {
        let mut playback = Playback::new(2, Some(vec![40, 300]), DEFAULT);
        assert_eq!(playback.wait_duration(), Some(Duration::from_millis(40)));
        playback.on_timeout();
        assert_eq!(playback.wait_duration(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_zero_delay_falls_back_to_default() {
        let mut playback = Playback::new(2, Some(vec![0, 0]), DEFAULT);
        assert_eq!(playback.wait_duration(), Some(DEFAULT));
        playback.on_timeout();
        assert_eq!(playback.wait_duration(), Some(DEFAULT));
    }

    #[test]
    fn test_short_delay_list_falls_back_to_default() {
        let mut playback = Playback::new(2, Some(vec![40]), DEFAULT);
        playback.on_timeout();
        assert_eq!(playback.wait_duration(), Some(DEFAULT));
    }

    #[test]
    fn test_timeout_advances_and_wraps() {
        let mut playback = Playback::new(2, None, DEFAULT);
        assert_eq!(playback.on_timeout(), Step::Redraw);
        assert_eq!(playback.index(), 1);
        assert_eq!(playback.on_timeout(), Step::Redraw);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn test_single_frame_timeout_does_not_redraw() {
        let mut playback = Playback::new(1, None, DEFAULT);
        for _ in 0..5 {
            assert_eq!(playback.on_timeout(), Step::Rearm);
        }
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn test_next_frame_at_end_pauses_and_wraps() {
        let mut playback = Playback::new(3, None, DEFAULT);
        playback.on_timeout();
        playback.on_timeout();
        assert_eq!(playback.index(), 2);

        assert_eq!(playback.on_key(Key::Char('c')), Step::Redraw);
        assert_eq!(playback.state(), PlayState::Paused);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn test_prev_frame_at_start_wraps() {
        let mut playback = Playback::new(3, None, DEFAULT);
        assert_eq!(playback.on_key(Key::Char('x')), Step::Redraw);
        assert_eq!(playback.index(), 2);
        assert_eq!(playback.state(), PlayState::Paused);
    }

    #[test]
    fn test_space_toggles() {
        let mut playback = Playback::new(3, None, DEFAULT);
        assert_eq!(playback.on_key(Key::Char(' ')), Step::Rearm);
        assert_eq!(playback.state(), PlayState::Paused);
        assert_eq!(playback.wait_duration(), None);
        assert_eq!(playback.on_timeout(), Step::Idle);

        playback.on_key(Key::Char(' '));
        assert_eq!(playback.state(), PlayState::Playing);
    }

    #[test]
    fn test_item_navigation_exits() {
        let mut playback = Playback::new(3, None, DEFAULT);
        assert_eq!(playback.on_key(Key::Char('d')), Step::Exit(Outcome::Next));
        assert_eq!(playback.on_key(Key::Char('a')), Step::Exit(Outcome::Prev));
        assert_eq!(playback.on_key(Key::Char('q')), Step::Exit(Outcome::Quit));
        assert_eq!(playback.on_key(Key::Interrupt), Step::Exit(Outcome::Quit));
    }

    #[test]
    fn test_unknown_key_is_idle() {
        let mut playback = Playback::new(3, None, DEFAULT);
        assert_eq!(playback.on_key(Key::Char('z')), Step::Idle);
        assert_eq!(playback.index(), 0);
        assert_eq!(playback.state(), PlayState::Playing);
    }

    #[test]
    fn test_empty_animation_does_not_panic() {
        let mut playback = Playback::new(0, None, DEFAULT);
        playback.on_key(Key::Char('c'));
        playback.on_key(Key::Char('x'));
        assert_eq!(playback.index(), 0);
    }
}
