// The on-screen keyboard: fixed rows of keys and the rectangle each key covers.
// Visual expectation: four rows of blue keys starting at (50,100), 60 px apart.

use std::fmt::{self, Display};

/// Rows top to bottom, keys left to right.
const ROWS: &[&[&str]] = &[
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "Bksp"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
    &["Z", "X", "C", "V", "B", "N", "M"],
    &["Space"],
];

const PITCH: i32 = 60; // distance between neighbouring key origins
const ORIGIN_X: i32 = 50;
const ORIGIN_Y: i32 = 100;
const KEY_WIDTH: i32 = 50;
const KEY_HEIGHT: i32 = 50;
const BKSP_WIDTH: i32 = 60;
const SPACE_WIDTH: i32 = 100;

/// What a key does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLabel {
    Letter(char),
    Backspace,
    Space,
}

impl KeyLabel {
    fn parse(label: &str) -> Self {
        match label {
            "Bksp" => KeyLabel::Backspace,
            "Space" => KeyLabel::Space,
            other => KeyLabel::Letter(other.chars().next().unwrap_or('?')),
        }
    }

    fn width(self) -> i32 {
        match self {
            KeyLabel::Space => SPACE_WIDTH,
            KeyLabel::Backspace => BKSP_WIDTH,
            KeyLabel::Letter(_) => KEY_WIDTH,
        }
    }
}

impl Display for KeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLabel::Letter(c) => write!(f, "{c}"),
            KeyLabel::Backspace => f.write_str("Bksp"),
            KeyLabel::Space => f.write_str("Space"),
        }
    }
}

/// Axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Strict interior test: points on an edge are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (x0, y0) = (self.x as f32, self.y as f32);
        let (x1, y1) = ((self.x + self.w) as f32, (self.y + self.h) as f32);
        x0 < x && x < x1 && y0 < y && y < y1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub label: KeyLabel,
    pub rect: Rect,
}

impl Key {
    /// Geometry of the key at `row`, `col`.
    pub fn at(row: usize, col: usize, label: KeyLabel) -> Self {
        let rect = Rect {
            x: col as i32 * PITCH + ORIGIN_X,
            y: row as i32 * PITCH + ORIGIN_Y,
            w: label.width(),
            h: KEY_HEIGHT,
        };
        Self { label, rect }
    }
}

/// All keys, stored in row-major order.
pub struct Keyboard {
    keys: Vec<Key>,
}

impl Keyboard {
    /// The QWERTY layout drawn on screen.
    pub fn standard() -> Self {
        let keys = ROWS
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(j, label)| Key::at(i, j, KeyLabel::parse(label)))
            })
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// First key (row-major) whose rectangle strictly contains (x, y).
    pub fn locate_key(&self, x: f32, y: f32) -> Option<&Key> {
        self.keys.iter().find(|k| k.rect.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(kb: &Keyboard, label: KeyLabel) -> Key {
        *kb.keys().iter().find(|k| k.label == label).unwrap()
    }

    #[test]
    fn layout_has_every_letter_plus_two_specials() {
        let kb = Keyboard::standard();
        assert_eq!(kb.keys().len(), 28);
        for c in 'A'..='Z' {
            assert!(kb.keys().iter().any(|k| k.label == KeyLabel::Letter(c)), "missing {c}");
        }
    }

    #[rstest]
    #[case(KeyLabel::Letter('Q'), Rect { x: 50, y: 100, w: 50, h: 50 })]
    #[case(KeyLabel::Letter('P'), Rect { x: 590, y: 100, w: 50, h: 50 })]
    #[case(KeyLabel::Backspace, Rect { x: 650, y: 100, w: 60, h: 50 })]
    #[case(KeyLabel::Letter('H'), Rect { x: 350, y: 160, w: 50, h: 50 })]
    #[case(KeyLabel::Letter('M'), Rect { x: 410, y: 220, w: 50, h: 50 })]
    #[case(KeyLabel::Space, Rect { x: 50, y: 280, w: 100, h: 50 })]
    fn key_geometry(#[case] label: KeyLabel, #[case] expected: Rect) {
        assert_eq!(key(&Keyboard::standard(), label).rect, expected);
    }

    #[test]
    fn every_interior_point_finds_its_own_key() {
        let kb = Keyboard::standard();
        for k in kb.keys() {
            let r = k.rect;
            for x in (r.x + 1)..(r.x + r.w) {
                for y in (r.y + 1)..(r.y + r.h) {
                    assert_eq!(kb.locate_key(x as f32, y as f32).map(|f| f.label), Some(k.label));
                }
            }
        }
    }

    #[test]
    fn boundary_points_never_match_the_key() {
        let kb = Keyboard::standard();
        for k in kb.keys() {
            let r = k.rect;
            let edges = (r.x..=r.x + r.w)
                .flat_map(|x| [(x, r.y), (x, r.y + r.h)])
                .chain((r.y..=r.y + r.h).flat_map(|y| [(r.x, y), (r.x + r.w, y)]));
            for (x, y) in edges {
                let hit = kb.locate_key(x as f32, y as f32).map(|f| f.label);
                assert_ne!(hit, Some(k.label), "({x},{y}) is on the edge of {}", k.label);
            }
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(100.0, 125.0)] // gap between Q and W
    #[case(75.0, 155.0)] // gap between rows
    #[case(200.0, 305.0)] // right of Space
    fn gaps_resolve_to_no_key(#[case] x: f32, #[case] y: f32) {
        assert!(Keyboard::standard().locate_key(x, y).is_none());
    }

    #[test]
    fn labels_render_like_the_keycaps() {
        assert_eq!(KeyLabel::Letter('A').to_string(), "A");
        assert_eq!(KeyLabel::Backspace.to_string(), "Bksp");
        assert_eq!(KeyLabel::Space.to_string(), "Space");
    }
}
