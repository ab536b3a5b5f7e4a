use fingerspell_core::{Finger, Landmark, LANDMARK_COUNT};
use crate::config::EstimatorConfig;
use crate::curl::estimate_curl;
use crate::direction::estimate_direction;
use crate::error::{EstimatorError, EstimatorResult};
use crate::geometry::landmark_slope;
use crate::types::{FingerPose, PoseEstimate};

/// Estimates per-finger curl and direction from a 21-point landmark set
#[derive(Debug, Clone)]
pub struct PoseEstimator {
    cfg: EstimatorConfig,
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self { cfg: EstimatorConfig::default() }
    }
}

impl PoseEstimator {
    /// Creates a new estimator with validation
    pub fn new(cfg: EstimatorConfig) -> EstimatorResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    fn validate_landmarks(landmarks: &[Landmark]) -> EstimatorResult<()> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(EstimatorError::InvalidLandmarkCount {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(())
    }

    /// Estimate curl and direction for every finger
    pub fn estimate(&self, landmarks: &[Landmark]) -> EstimatorResult<PoseEstimate> {
        Self::validate_landmarks(landmarks)?;

        let fingers = Finger::ALL.map(|finger| self.estimate_finger(landmarks, finger));
        for fp in &fingers {
            log::trace!(
                "{}: curl {:.1}° ({}), direction {} (votes v={:.2} d={:.2} h={:.2})",
                fp.finger, fp.curl_angle, fp.curl, fp.direction,
                fp.votes.vertical, fp.votes.diagonal, fp.votes.horizontal
            );
        }
        Ok(PoseEstimate { fingers })
    }

    fn estimate_finger(&self, landmarks: &[Landmark], finger: Finger) -> FingerPose {
        let chain = finger.chain();
        // Thumb measurements start at the CMC joint
        let first = if finger == Finger::Thumb { 1 } else { 0 };

        let start = &landmarks[chain[first]];
        let mid = &landmarks[chain[first + 2]];
        let end = &landmarks[chain[4]];

        let slopes: Vec<f32> = chain[first..]
            .windows(2)
            .map(|pair| landmark_slope(&landmarks[pair[0]], &landmarks[pair[1]]))
            .collect();

        let (curl_angle, curl) = estimate_curl(start, mid, end, &self.cfg);
        let (votes, direction) = estimate_direction(start, mid, end, &slopes, &self.cfg);

        FingerPose {
            finger,
            curl_angle,
            curl,
            votes,
            direction,
        }
    }

    /// Get estimator configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.cfg
    }
}
