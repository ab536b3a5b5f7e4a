use std::sync::Arc;

use fingerspell_core::Landmark;
use fingerspell_pose::{PoseEstimate, PoseEstimator};
use crate::error::GestureResult;
use crate::library::TemplateLibrary;

/// Score of one template against one pose
#[derive(Debug, Clone, PartialEq)]
pub struct GestureScore {
    pub name: String,
    pub score: f32,
}

/// Every template's score for one landmark set, in library order
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub pose: PoseEstimate,
    pub scores: Vec<GestureScore>,
}

/// Highest score, earliest candidate on ties
pub fn best_score(scores: &[GestureScore]) -> Option<&GestureScore> {
    scores.iter().fold(None, |best: Option<&GestureScore>, s| match best {
        Some(b) if b.score >= s.score => Some(b),
        _ => Some(s),
    })
}

impl MatchResult {
    pub fn best(&self) -> Option<&GestureScore> {
        best_score(&self.scores)
    }

    pub fn score_of(&self, name: &str) -> Option<f32> {
        self.scores.iter().find(|s| s.name == name).map(|s| s.score)
    }
}

/// Scores landmark sets against a shared, read-only template library
#[derive(Debug, Clone)]
pub struct GestureMatcher {
    estimator: PoseEstimator,
    library: Arc<TemplateLibrary>,
}

impl Default for GestureMatcher {
    fn default() -> Self {
        Self::new(PoseEstimator::default(), Arc::new(TemplateLibrary::fingerspelling()))
    }
}

impl GestureMatcher {
    pub fn new(estimator: PoseEstimator, library: Arc<TemplateLibrary>) -> Self {
        Self { estimator, library }
    }

    pub fn library(&self) -> &Arc<TemplateLibrary> {
        &self.library
    }

    pub fn estimator(&self) -> &PoseEstimator {
        &self.estimator
    }

    /// Estimate the pose and score it against every template
    pub fn match_landmarks(&self, landmarks: &[Landmark]) -> GestureResult<MatchResult> {
        let pose = self.estimator.estimate(landmarks)?;
        log::trace!("Matching pose against {} templates", self.library.len());
        Ok(self.score_pose(pose))
    }

    /// Score an already estimated pose
    pub fn score_pose(&self, pose: PoseEstimate) -> MatchResult {
        let scores = self.library
            .templates()
            .iter()
            .map(|t| GestureScore {
                name: t.name().to_string(),
                score: t.score(&pose),
            })
            .collect();
        MatchResult { pose, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerspell_core::{FingerCurl, FingerDirection, LANDMARK_COUNT};
    use fingerspell_pose::EstimatorError;
    use crate::error::GestureError;
    use proptest::prelude::*;

    const WRIST: (f32, f32) = (100.0, 300.0);
    const FINGER_X: [f32; 4] = [92.0, 100.0, 108.0, 115.0];

    fn set(lms: &mut [Landmark], i: usize, (x, y): (f32, f32)) {
        lms[i] = Landmark::new(x, y, 0.0);
    }

    /// Fist with the thumb out to the side, pointing up and to the right
    fn letter_a() -> Vec<Landmark> {
        let mut lms = vec![Landmark::default(); LANDMARK_COUNT];
        set(&mut lms, 0, WRIST);
        for (i, p) in [(130.0, 260.0), (150.0, 240.0), (170.0, 220.0), (190.0, 200.0)].into_iter().enumerate() {
            set(&mut lms, 1 + i, p);
        }
        for (f, x) in FINGER_X.into_iter().enumerate() {
            for (j, y) in [220.0, 180.0, 200.0, 230.0].into_iter().enumerate() {
                set(&mut lms, 5 + f * 4 + j, (x, y));
            }
        }
        lms
    }

    /// Flat hand, every finger straight up
    fn letter_b() -> Vec<Landmark> {
        let mut lms = vec![Landmark::default(); LANDMARK_COUNT];
        set(&mut lms, 0, WRIST);
        for (i, y) in [260.0, 220.0, 180.0, 140.0].into_iter().enumerate() {
            set(&mut lms, 1 + i, (60.0, y));
        }
        for (f, x) in FINGER_X.into_iter().enumerate() {
            for (j, y) in [220.0, 180.0, 150.0, 120.0].into_iter().enumerate() {
                set(&mut lms, 5 + f * 4 + j, (x, y));
            }
        }
        lms
    }

    fn approx(a: Option<f32>, b: f32) -> bool {
        a.is_some_and(|a| (a - b).abs() < 0.01)
    }

    #[test]
    fn test_letter_a_scores() {
        let result = GestureMatcher::default().match_landmarks(&letter_a()).unwrap();
        assert_eq!(result.pose.curl(fingerspell_core::Finger::Thumb), FingerCurl::NoCurl);
        assert_eq!(
            result.pose.direction(fingerspell_core::Finger::Thumb),
            FingerDirection::DiagonalUpRight
        );
        assert!(approx(result.score_of("A"), 10.0));
        assert!(approx(result.score_of("B"), 38.0 / 8.5));
        assert!(approx(result.score_of("C"), 7.0 / 8.5));
        assert!(approx(result.score_of("D"), 58.0 / 8.5));
        assert_eq!(result.best().unwrap().name, "A");
    }

    #[test]
    fn test_letter_b_scores() {
        let result = GestureMatcher::default().match_landmarks(&letter_b()).unwrap();
        assert!(approx(result.score_of("A"), 38.0 / 8.5));
        assert!(approx(result.score_of("B"), 10.0));
        assert!(approx(result.score_of("C"), 0.0));
        assert!(approx(result.score_of("D"), 45.0 / 8.5));
        assert_eq!(result.best().unwrap().name, "B");
    }

    #[test]
    fn test_scores_follow_library_order() {
        let result = GestureMatcher::default().match_landmarks(&letter_b()).unwrap();
        let names: Vec<&str> = result.scores.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_wrong_landmark_count_is_invalid_input() {
        let result = GestureMatcher::default().match_landmarks(&letter_a()[..20]);
        assert_eq!(
            result,
            Err(GestureError::InvalidInput(EstimatorError::InvalidLandmarkCount { expected: 21, actual: 20 }))
        );
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let pose = PoseEstimate::from_classes([(FingerCurl::NoCurl, FingerDirection::VerticalUp); 5]);
        let result = MatchResult {
            pose,
            scores: vec![
                GestureScore { name: "X".into(), score: 9.0 },
                GestureScore { name: "Y".into(), score: 9.0 },
                GestureScore { name: "Z".into(), score: 1.0 },
            ],
        };
        assert_eq!(result.best().unwrap().name, "X");
        assert!(MatchResult { pose, scores: Vec::new() }.best().is_none());
    }

    fn landmark_strategy() -> impl Strategy<Value = Landmark> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, -100.0f32..100.0)
            .prop_map(|(x, y, z)| Landmark::new(x, y, z))
    }

    proptest! {
        #[test]
        fn test_one_score_per_template_in_range(
            lms in prop::collection::vec(landmark_strategy(), LANDMARK_COUNT)
        ) {
            let matcher = GestureMatcher::default();
            let result = matcher.match_landmarks(&lms).unwrap();
            prop_assert_eq!(result.scores.len(), matcher.library().len());
            for s in &result.scores {
                prop_assert!((0.0..=10.0).contains(&s.score), "{} scored {}", s.name, s.score);
            }
        }

        #[test]
        fn test_matching_is_deterministic(
            lms in prop::collection::vec(landmark_strategy(), LANDMARK_COUNT)
        ) {
            let matcher = GestureMatcher::default();
            prop_assert_eq!(matcher.match_landmarks(&lms), matcher.match_landmarks(&lms));
        }
    }
}
