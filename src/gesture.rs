//! Pinch gestures read off a single hand.
//!
//! Both gestures are "fingertip touches thumb tip" tests in pixel space:
//!
//! | Gesture | Fingers | Meaning |
//! |---|---|---|
//! | [`Gesture::Click`] | index tip + thumb tip | press the key under the index tip |
//! | [`Gesture::Backspace`] | middle tip + thumb tip | delete the last character |
//!
//! The threshold is a fixed pixel distance; it does not scale with how far the
//! hand is from the camera.

use crate::landmarks::{LandmarkSet, index};

/// Tips closer than this (pixels) count as touching.
pub const PINCH_THRESHOLD_PX: f32 = 30.0;

/// Fewer landmarks than this and no gesture is evaluated.
pub const MIN_LANDMARKS: usize = index::MIDDLE_TIP + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Backspace,
}

fn pinched(hand: &LandmarkSet, finger: usize) -> bool {
    match (hand.get(finger), hand.get(index::THUMB_TIP)) {
        (Some(tip), Some(thumb)) => tip.distance(thumb) < PINCH_THRESHOLD_PX,
        _ => false,
    }
}

/// Index tip within the pinch threshold of the thumb tip.
pub fn is_click(hand: &LandmarkSet) -> bool {
    pinched(hand, index::INDEX_TIP)
}

/// Middle tip within the pinch threshold of the thumb tip.
pub fn is_backspace_gesture(hand: &LandmarkSet) -> bool {
    pinched(hand, index::MIDDLE_TIP)
}

/// A gesture paired with the predicate that detects it.
#[derive(Clone, Copy)]
pub struct GestureRule {
    pub gesture: Gesture,
    pub detect: fn(&LandmarkSet) -> bool,
}

/// Evaluation order; the first rule that detects wins the frame.
pub const RULES: [GestureRule; 2] = [
    GestureRule { gesture: Gesture::Click, detect: is_click },
    GestureRule { gesture: Gesture::Backspace, detect: is_backspace_gesture },
];

/// The highest-priority gesture present in `hand`, if any.
/// Partial hands never produce a gesture.
pub fn classify(hand: &LandmarkSet) -> Option<Gesture> {
    if hand.len() < MIN_LANDMARKS {
        return None;
    }
    RULES.iter().find(|rule| (rule.detect)(hand)).map(|rule| rule.gesture)
}
