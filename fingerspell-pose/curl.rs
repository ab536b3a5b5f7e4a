use fingerspell_core::{FingerCurl, Landmark};
use crate::config::EstimatorConfig;
use crate::geometry::joint_angle;

/// Bucket a joint angle (degrees) into a curl classification
pub fn classify_curl(angle: f32, cfg: &EstimatorConfig) -> FingerCurl {
    if angle > cfg.no_curl_start_limit {
        FingerCurl::NoCurl
    } else if angle > cfg.half_curl_start_limit {
        FingerCurl::HalfCurl
    } else {
        FingerCurl::FullCurl
    }
}

/// Curl angle and classification from the finger's start, middle and end points
pub fn estimate_curl(
    start: &Landmark,
    mid: &Landmark,
    end: &Landmark,
    cfg: &EstimatorConfig,
) -> (f32, FingerCurl) {
    let angle = joint_angle(start, mid, end);
    (angle, classify_curl(angle, cfg))
}
