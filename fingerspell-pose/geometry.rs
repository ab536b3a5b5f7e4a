//! Geometry helpers for landmark chains
use fingerspell_core::Landmark;
use crate::types::DirectionVotes;

/// Undirected line angle of `p1 -> p2` in degrees, range [0, 180), y axis pointing up.
/// A degenerate segment yields 0.
pub fn segment_slope(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Landmarks use image coordinates, so y is flipped before measuring
    let deg = (y1 - y2).atan2(x2 - x1).to_degrees();
    let slope = deg.rem_euclid(180.0);
    // rem_euclid can round up to exactly 180 for tiny negative angles
    if slope >= 180.0 { 0.0 } else { slope }
}

/// Slope between two landmarks, ignoring depth
pub fn landmark_slope(a: &Landmark, b: &Landmark) -> f32 {
    segment_slope(a.x, a.y, b.x, b.y)
}

pub fn distance_3d(a: &Landmark, b: &Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

pub fn distance_2d(a: &Landmark, b: &Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle at `mid` between `start` and `end` in degrees, law of cosines on 3D distances.
///
/// Returns 180 (straight) when either arm has zero length.
pub fn joint_angle(start: &Landmark, mid: &Landmark, end: &Landmark) -> f32 {
    let start_mid = distance_3d(start, mid);
    let mid_end = distance_3d(mid, end);
    let start_end = distance_3d(start, end);

    if start_mid < f32::EPSILON || mid_end < f32::EPSILON {
        return 180.0;
    }

    let cos_in = (mid_end * mid_end + start_mid * start_mid - start_end * start_end)
        / (2.0 * mid_end * start_mid);
    cos_in.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Orientation vote for a single slope, weighted by `weight`
pub fn orientation_vote(slope: f32, weight: f32) -> DirectionVotes {
    let mut votes = DirectionVotes::default();
    if (75.0..=105.0).contains(&slope) {
        votes.vertical = weight;
    } else if (25.0..=155.0).contains(&slope) {
        votes.diagonal = weight;
    } else {
        votes.horizontal = weight;
    }
    votes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    #[test]
    fn test_slope_axes() {
        // Upward in image space: y decreases
        assert!((segment_slope(0.0, 10.0, 0.0, 0.0) - 90.0).abs() < 1e-4);
        assert!((segment_slope(0.0, 0.0, 0.0, 10.0) - 90.0).abs() < 1e-4);
        assert!(segment_slope(0.0, 0.0, 10.0, 0.0).abs() < 1e-4);
        assert!(segment_slope(10.0, 0.0, 0.0, 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_slope_diagonals() {
        // Up and to the right
        assert!((segment_slope(0.0, 10.0, 10.0, 0.0) - 45.0).abs() < 1e-4);
        // Up and to the left
        assert!((segment_slope(10.0, 10.0, 0.0, 0.0) - 135.0).abs() < 1e-4);
        // Same line regardless of traversal order
        assert!((segment_slope(10.0, 0.0, 0.0, 10.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_slope() {
        assert_eq!(segment_slope(3.0, 3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_joint_angle_straight_and_bent() {
        let straight = joint_angle(&lm(0.0, 0.0), &lm(0.0, 5.0), &lm(0.0, 10.0));
        assert!((straight - 180.0).abs() < 0.1);

        let right = joint_angle(&lm(0.0, 0.0), &lm(0.0, 5.0), &lm(5.0, 5.0));
        assert!((right - 90.0).abs() < 0.1);

        let folded = joint_angle(&lm(0.0, 0.0), &lm(0.0, 10.0), &lm(0.0, 2.0));
        assert!(folded < 1.0);
    }

    #[test]
    fn test_joint_angle_degenerate() {
        let p = lm(4.0, 4.0);
        assert_eq!(joint_angle(&p, &p, &lm(9.0, 9.0)), 180.0);
    }

    #[test]
    fn test_orientation_vote_bands() {
        assert_eq!(orientation_vote(90.0, 1.6).vertical, 1.6);
        assert_eq!(orientation_vote(75.0, 1.0).vertical, 1.0);
        assert_eq!(orientation_vote(45.0, 0.9).diagonal, 0.9);
        assert_eq!(orientation_vote(155.0, 0.9).diagonal, 0.9);
        assert_eq!(orientation_vote(10.0, 0.9).horizontal, 0.9);
        assert_eq!(orientation_vote(170.0, 0.9).horizontal, 0.9);
    }
}
