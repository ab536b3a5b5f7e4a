#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorError {
    InvalidLandmarkCount { expected: usize, actual: usize },
    InvalidCurlLimits { half_curl_start: f32, no_curl_start: f32 },
    InvalidVotePower { name: &'static str, value: f32 },
}

impl std::fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorError::InvalidLandmarkCount { expected, actual } => {
                write!(f, "Invalid landmark count: expected {}, got {}", expected, actual)
            }
            EstimatorError::InvalidCurlLimits { half_curl_start, no_curl_start } => {
                write!(
                    f,
                    "Invalid curl limits: half curl starts at {}°, no curl at {}° (need 0 < half < no curl <= 180)",
                    half_curl_start, no_curl_start
                )
            }
            EstimatorError::InvalidVotePower { name, value } => {
                write!(f, "Invalid vote power {}: {} (must be finite and > 0)", name, value)
            }
        }
    }
}

impl std::error::Error for EstimatorError {}

pub type EstimatorResult<T> = Result<T, EstimatorError>;
