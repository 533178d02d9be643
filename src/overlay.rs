// Everything drawn on top of the camera image.
// Visual expectation: blue keys with white letters, the hand skeleton,
// a green flash on a press, "Deleted" in red, and the typed text in yellow.

use crate::controller::Action;
use crate::draw::{draw_line, draw_text, fill_circle, fill_rect, stroke_rect};
use crate::landmarks::{HAND_CONNECTIONS, LandmarkSet};
use crate::layout::{KeyLabel, Keyboard};
use crate::types::{FrameBuffer, Point};

const KEY_FILL: u32 = 0x00_00_00_FF; // blue
const KEY_TEXT: u32 = 0x00_FF_FF_FF;
const BONE: u32 = 0x00_E0_E0_E0;
const JOINT: u32 = 0x00_FF_00_00;
const PRESSED: u32 = 0x00_00_FF_00;
const DELETED: u32 = 0x00_FF_00_00;
const TYPED: u32 = 0x00_FF_FF_00;

// Landmarks further than this off-frame are pinned to it before drawing.
const OFF_FRAME: f32 = 64.0;

const LABEL_SCALE: i32 = 3;
const FEEDBACK_SCALE: i32 = 4;
const TYPED_SCALE: i32 = 4;

pub fn draw_keyboard(fb: &mut FrameBuffer, keyboard: &Keyboard) {
    for key in keyboard.keys() {
        let r = key.rect;
        fill_rect(fb, r.x, r.y, r.w + 1, r.h + 1, KEY_FILL);
        let text_x = if key.label == KeyLabel::Space { r.x + 25 } else { r.x + 10 };
        draw_text(fb, text_x, r.y + 35, &key.label.to_string(), LABEL_SCALE, KEY_TEXT);
    }
}

fn to_px(fb: &FrameBuffer, p: Point) -> (i32, i32) {
    let x = p.x.clamp(-OFF_FRAME, fb.width as f32 + OFF_FRAME);
    let y = p.y.clamp(-OFF_FRAME, fb.height as f32 + OFF_FRAME);
    (x as i32, y as i32)
}

pub fn draw_hand(fb: &mut FrameBuffer, hand: &LandmarkSet) {
    for &(a, b) in &HAND_CONNECTIONS {
        if let (Some(p), Some(q)) = (hand.get(a), hand.get(b)) {
            let ((x0, y0), (x1, y1)) = (to_px(fb, p), to_px(fb, q));
            draw_line(fb, x0, y0, x1, y1, BONE);
        }
    }
    for &p in hand.points() {
        let (x, y) = to_px(fb, p);
        fill_circle(fb, x, y, 3, JOINT);
    }
}

/// Feedback for an edit committed this frame.
pub fn draw_action(fb: &mut FrameBuffer, action: &Action) {
    match action {
        Action::Pressed { key, at } => {
            let (x, y) = to_px(fb, *at);
            stroke_rect(fb, x - 25, y - 25, x + 25, y + 25, 3, PRESSED);
            draw_text(fb, 50, 50, &format!("Pressed: {key}"), FEEDBACK_SCALE, PRESSED);
        }
        Action::Deleted => draw_text(fb, 50, 90, "Deleted", LABEL_SCALE, DELETED),
    }
}

pub fn draw_typed(fb: &mut FrameBuffer, text: &str) {
    draw_text(fb, 50, 450, text, TYPED_SCALE, TYPED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_painted_blue() {
        let mut fb = FrameBuffer::new(800, 480);
        draw_keyboard(&mut fb, &Keyboard::standard());
        // top-left corner of Q, clear of its label
        assert_eq!(fb.pixels[102 * 800 + 52], KEY_FILL);
        // gap between Q and W stays untouched
        assert_eq!(fb.pixels[125 * 800 + 105], 0);
    }

    #[test]
    fn press_feedback_boxes_the_fingertip() {
        let mut fb = FrameBuffer::new(640, 480);
        let action = Action::Pressed { key: KeyLabel::Letter('A'), at: Point::new(300.0, 300.0) };
        draw_action(&mut fb, &action);
        assert_eq!(fb.pixels[275 * 640 + 300], PRESSED);
        assert_eq!(fb.pixels[300 * 640 + 300], 0);
    }

    #[test]
    fn hand_joints_are_drawn() {
        let mut fb = FrameBuffer::new(100, 100);
        let hand = LandmarkSet::new(vec![Point::new(50.0, 50.0); 21]);
        draw_hand(&mut fb, &hand);
        assert_eq!(fb.pixels[50 * 100 + 50], JOINT);
    }

    #[test]
    fn far_off_landmarks_are_pinned_to_the_frame() {
        let mut fb = FrameBuffer::new(640, 480);
        let hand = LandmarkSet::from_normalized(vec![(5.0e9, 0.5); 21], 640, 480);
        draw_hand(&mut fb, &hand);
        let action = Action::Pressed { key: KeyLabel::Letter('Q'), at: Point::new(f32::MIN, f32::MAX) };
        draw_action(&mut fb, &action);
        // the hand sits off the right edge, so only the feedback text shows
        assert!(fb.pixels.iter().all(|&p| p != JOINT && p != BONE));
        assert!(fb.pixels.contains(&PRESSED));
    }

    #[test]
    fn hand_near_the_edge_is_still_drawn() {
        let mut fb = FrameBuffer::new(100, 100);
        let hand = LandmarkSet::new(vec![Point::new(99.0, 50.0); 21]);
        draw_hand(&mut fb, &hand);
        assert_eq!(fb.pixels[50 * 100 + 99], JOINT);
    }
}
