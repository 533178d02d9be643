// One hand's keypoints for the current frame, in window pixels.

use crate::types::Point;

/// Hand landmark indices (21-point hand model) the gestures read.
pub mod index {
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_TIP: usize = 12;
}

pub const HAND_LANDMARKS: usize = 21;

/// Bones drawn between landmarks for the skeleton overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// Landmarks in detector order. May be shorter than 21 if the detector
/// returned a partial hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Map normalized [0,1] coordinates to pixels, truncating to whole pixels.
    pub fn from_normalized<I>(coords: I, width: usize, height: usize) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let (w, h) = (width as f32, height as f32);
        let points = coords
            .into_iter()
            .map(|(x, y)| Point::new((x * w).trunc(), (y * h).trunc()))
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn index_tip(&self) -> Option<Point> {
        self.get(index::INDEX_TIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_coords_truncate_to_pixels() {
        let set = LandmarkSet::from_normalized([(0.5, 0.5), (0.999, 0.001)], 640, 480);
        assert_eq!(set.points(), &[Point::new(320.0, 240.0), Point::new(639.0, 0.0)]);
    }

    #[test]
    fn partial_sets_have_no_index_tip() {
        let set = LandmarkSet::new(vec![Point::default(); 5]);
        assert_eq!(set.index_tip(), None);
    }

    #[test]
    fn connections_stay_inside_the_hand() {
        assert!(HAND_CONNECTIONS.iter().all(|&(a, b)| a < HAND_LANDMARKS && b < HAND_LANDMARKS));
    }
}
