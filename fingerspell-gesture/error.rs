use fingerspell_core::Finger;
use fingerspell_pose::EstimatorError;

#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    /// Landmark set rejected by the pose estimator
    InvalidInput(EstimatorError),
    MissingCurlRule { template: String, finger: Finger },
    MissingDirectionRule { template: String, finger: Finger },
    WeightOutOfRange { template: String, finger: Finger, weight: f32 },
    InvalidFingerWeight { template: String, finger: Finger, weight: f32 },
    DuplicateTemplate(String),
    EmptyLibrary,
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            GestureError::MissingCurlRule { template, finger } => {
                write!(f, "Template '{}' has no curl rule for {}", template, finger)
            }
            GestureError::MissingDirectionRule { template, finger } => {
                write!(f, "Template '{}' has no direction rule for {}", template, finger)
            }
            GestureError::WeightOutOfRange { template, finger, weight } => {
                write!(f, "Template '{}': weight {} for {} outside [0, 1]", template, weight, finger)
            }
            GestureError::InvalidFingerWeight { template, finger, weight } => {
                write!(f, "Template '{}': finger weight {} for {} must be finite and >= 0", template, weight, finger)
            }
            GestureError::DuplicateTemplate(name) => write!(f, "Duplicate template name '{}'", name),
            GestureError::EmptyLibrary => write!(f, "Template library is empty"),
        }
    }
}

impl std::error::Error for GestureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GestureError::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EstimatorError> for GestureError {
    fn from(err: EstimatorError) -> Self {
        GestureError::InvalidInput(err)
    }
}

pub type GestureResult<T> = Result<T, GestureError>;
