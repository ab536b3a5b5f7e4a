//! Synthetic hands shared by the unit tests

use fingerspell_core::{HandPrediction, Landmark, LANDMARK_COUNT};

const WRIST: Landmark = Landmark::new(100.0, 300.0, 0.0);
const FINGER_X: [f32; 4] = [92.0, 100.0, 108.0, 115.0];

fn hand(thumb: [(f32, f32); 4], finger_y: [f32; 4]) -> HandPrediction {
    let mut lms = vec![WRIST; LANDMARK_COUNT];
    for (i, (x, y)) in thumb.into_iter().enumerate() {
        lms[1 + i] = Landmark::new(x, y, 0.0);
    }
    for (f, x) in FINGER_X.into_iter().enumerate() {
        for (j, y) in finger_y.into_iter().enumerate() {
            lms[5 + f * 4 + j] = Landmark::new(x, y, 0.0);
        }
    }
    HandPrediction::new(0.95, lms)
}

/// Fist, thumb out and pointing up to the right
pub fn letter_a() -> HandPrediction {
    hand(
        [(130.0, 260.0), (150.0, 240.0), (170.0, 220.0), (190.0, 200.0)],
        [220.0, 180.0, 200.0, 230.0],
    )
}

/// Flat hand, every finger straight up
pub fn letter_b() -> HandPrediction {
    hand(
        [(60.0, 260.0), (60.0, 220.0), (60.0, 180.0), (60.0, 140.0)],
        [220.0, 180.0, 150.0, 120.0],
    )
}
