use fingerspell_core::{FingerDirection, Landmark};
use crate::config::EstimatorConfig;
use crate::geometry::{distance_2d, orientation_vote, segment_slope};
use crate::types::{Axis, DirectionVotes};

/// Signed extents between the three reference points along one axis
#[derive(Debug, Clone, Copy)]
struct Extents {
    start_mid: f32,
    start_end: f32,
    mid_end: f32,
}

impl Extents {
    fn new(start: f32, mid: f32, end: f32) -> Self {
        Self {
            start_mid: start - mid,
            start_end: start - end,
            mid_end: mid - end,
        }
    }

    fn max_abs(&self) -> f32 {
        self.start_mid.abs().max(self.start_end.abs()).max(self.mid_end.abs())
    }

    /// Sign of the dominant extent; start-end wins ties, then start-mid
    fn dominant_positive(&self) -> bool {
        let max = self.max_abs();
        if max == self.start_end.abs() {
            self.start_end > 0.0
        } else if max == self.start_mid.abs() {
            self.start_mid > 0.0
        } else {
            self.mid_end > 0.0
        }
    }
}

fn vertical(dy: &Extents) -> FingerDirection {
    // Image y grows downward: a base below the tip means pointing up
    if dy.dominant_positive() {
        FingerDirection::VerticalUp
    } else {
        FingerDirection::VerticalDown
    }
}

fn horizontal(dx: &Extents) -> FingerDirection {
    if dx.dominant_positive() {
        FingerDirection::HorizontalLeft
    } else {
        FingerDirection::HorizontalRight
    }
}

fn diagonal(dx: &Extents, dy: &Extents) -> FingerDirection {
    match (vertical(dy), horizontal(dx)) {
        (FingerDirection::VerticalUp, FingerDirection::HorizontalLeft) => FingerDirection::DiagonalUpLeft,
        (FingerDirection::VerticalUp, _) => FingerDirection::DiagonalUpRight,
        (_, FingerDirection::HorizontalLeft) => FingerDirection::DiagonalDownLeft,
        _ => FingerDirection::DiagonalDownRight,
    }
}

/// Vote on the pointing direction of a finger.
///
/// `segment_slopes` are the slopes of the finger segments that take part in
/// the vote. The whole-finger slope is measured along the longest of the
/// start-mid, start-end and mid-end spans.
pub fn estimate_direction(
    start: &Landmark,
    mid: &Landmark,
    end: &Landmark,
    segment_slopes: &[f32],
    cfg: &EstimatorConfig,
) -> (DirectionVotes, FingerDirection) {
    let dx = Extents::new(start.x, mid.x, end.x);
    let dy = Extents::new(start.y, mid.y, end.y);

    let mut votes = DirectionVotes::default();

    let ratio = dy.max_abs() / (dx.max_abs() + 0.00001);
    if ratio > 1.5 {
        votes.vertical += cfg.distance_vote_power;
    } else if ratio > 0.66 {
        votes.diagonal += cfg.distance_vote_power;
    } else {
        votes.horizontal += cfg.distance_vote_power;
    }

    let start_mid = distance_2d(start, mid);
    let start_end = distance_2d(start, end);
    let mid_end = distance_2d(mid, end);
    let longest = start_mid.max(start_end).max(mid_end);

    let span_start = if longest == mid_end && longest != start_mid { mid } else { start };
    let total = segment_slope(span_start.x, span_start.y, end.x, end.y);
    votes.add(orientation_vote(total, cfg.total_angle_vote_power));

    for &slope in segment_slopes {
        votes.add(orientation_vote(slope, cfg.single_angle_vote_power));
    }

    let direction = match votes.axis() {
        Axis::Vertical => vertical(&dy),
        Axis::Horizontal => horizontal(&dx),
        Axis::Diagonal => diagonal(&dx, &dy),
    };
    (votes, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::landmark_slope;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    fn direction_of(points: &[Landmark]) -> FingerDirection {
        let slopes: Vec<f32> = points.windows(2).map(|w| landmark_slope(&w[0], &w[1])).collect();
        let n = points.len();
        let (_, dir) = estimate_direction(
            &points[0],
            &points[n - 2],
            &points[n - 1],
            &slopes,
            &EstimatorConfig::default(),
        );
        dir
    }

    #[test]
    fn test_vertical_directions() {
        let up = [lm(50.0, 100.0), lm(50.0, 70.0), lm(50.0, 40.0), lm(50.0, 10.0)];
        assert_eq!(direction_of(&up), FingerDirection::VerticalUp);

        let down = [lm(50.0, 10.0), lm(50.0, 40.0), lm(50.0, 70.0), lm(50.0, 100.0)];
        assert_eq!(direction_of(&down), FingerDirection::VerticalDown);
    }

    #[test]
    fn test_horizontal_directions() {
        let left = [lm(100.0, 50.0), lm(70.0, 50.0), lm(40.0, 50.0), lm(10.0, 50.0)];
        assert_eq!(direction_of(&left), FingerDirection::HorizontalLeft);

        let right = [lm(10.0, 50.0), lm(40.0, 50.0), lm(70.0, 50.0), lm(100.0, 50.0)];
        assert_eq!(direction_of(&right), FingerDirection::HorizontalRight);
    }

    #[test]
    fn test_diagonal_directions() {
        let up_right = [lm(0.0, 90.0), lm(30.0, 60.0), lm(60.0, 30.0), lm(90.0, 0.0)];
        assert_eq!(direction_of(&up_right), FingerDirection::DiagonalUpRight);

        let up_left = [lm(90.0, 90.0), lm(60.0, 60.0), lm(30.0, 30.0), lm(0.0, 0.0)];
        assert_eq!(direction_of(&up_left), FingerDirection::DiagonalUpLeft);

        let down_right = [lm(0.0, 0.0), lm(30.0, 30.0), lm(60.0, 60.0), lm(90.0, 90.0)];
        assert_eq!(direction_of(&down_right), FingerDirection::DiagonalDownRight);

        let down_left = [lm(90.0, 0.0), lm(60.0, 30.0), lm(30.0, 60.0), lm(0.0, 90.0)];
        assert_eq!(direction_of(&down_left), FingerDirection::DiagonalDownLeft);
    }

    #[test]
    fn test_votes_accumulate_all_sources() {
        let up = [lm(50.0, 100.0), lm(50.0, 70.0), lm(50.0, 40.0), lm(50.0, 10.0)];
        let slopes: Vec<f32> = up.windows(2).map(|w| landmark_slope(&w[0], &w[1])).collect();
        let cfg = EstimatorConfig::default();
        let (votes, _) = estimate_direction(&up[0], &up[2], &up[3], &slopes, &cfg);
        let expected = cfg.distance_vote_power + cfg.total_angle_vote_power + 3.0 * cfg.single_angle_vote_power;
        assert!((votes.vertical - expected).abs() < 1e-5);
        assert_eq!(votes.diagonal, 0.0);
        assert_eq!(votes.horizontal, 0.0);
    }
}
