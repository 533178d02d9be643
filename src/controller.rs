// Turns per-frame gestures into edits of the typed text, at most one edit per cooldown.
// Visual expectation: holding a pinch over a key types it once, then again every 0.5 s.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::gesture::{self, Gesture};
use crate::landmarks::LandmarkSet;
use crate::layout::{KeyLabel, Keyboard};
use crate::types::Point;

/// Minimum time between two committed edits.
pub const COOLDOWN: Duration = Duration::from_millis(500);

/// An edit that was committed this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// A key was clicked; `at` is the index fingertip that hit it.
    Pressed { key: KeyLabel, at: Point },
    /// The backspace gesture removed a character (or tried to).
    Deleted,
}

/// Owns the typed text and the debounce timer.
pub struct InputController {
    keyboard: Keyboard,
    text: String,
    last_commit: Option<Instant>,
}

impl InputController {
    pub fn new(keyboard: Keyboard) -> Self {
        Self { keyboard, text: String::new(), last_commit: None }
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once the cooldown since the last commit has fully elapsed.
    pub fn is_armed(&self, now: Instant) -> bool {
        match self.last_commit {
            None => true,
            Some(t) => now.saturating_duration_since(t) >= COOLDOWN,
        }
    }

    /// Feed one frame's hand, stamped with the current time.
    pub fn handle_frame(&mut self, hand: &LandmarkSet) -> Option<Action> {
        self.handle_frame_at(hand, Instant::now())
    }

    pub fn handle_frame_at(&mut self, hand: &LandmarkSet, now: Instant) -> Option<Action> {
        if !self.is_armed(now) {
            return None;
        }
        let action = match gesture::classify(hand)? {
            Gesture::Click => self.click(hand)?,
            Gesture::Backspace => {
                self.text.pop();
                Action::Deleted
            }
        };
        self.last_commit = Some(now);
        debug!(?action, text = %self.text, "committed");
        Some(action)
    }

    // A click that misses every key returns None and leaves the timer alone.
    fn click(&mut self, hand: &LandmarkSet) -> Option<Action> {
        let at = hand.index_tip()?;
        let key = self.keyboard.locate_key(at.x, at.y)?.label;
        match key {
            KeyLabel::Space => self.text.push(' '),
            KeyLabel::Backspace => {
                self.text.pop();
            }
            KeyLabel::Letter(c) => self.text.push(c),
        }
        Some(Action::Pressed { key, at })
    }
}
