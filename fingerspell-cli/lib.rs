use std::sync::Arc;

use fingerspell_core::{HandPrediction, Landmark};
use fingerspell_gesture::{GestureError, GestureMatcher, GestureResult, MatchResult, TemplateLibrary};
use fingerspell_pose::{EstimatorError, PoseEstimator};
use rayon::prelude::*;

pub mod config;
pub mod display;
pub mod frame_loop;
pub mod selection;
pub mod source;

#[cfg(test)]
mod test_support;

pub use fingerspell_core;
pub use fingerspell_gesture;
pub use fingerspell_pose;

pub use config::RecognizerConfig;
pub use display::{ConsoleDisplay, DisplaySink, OverlayRenderer, render_overlay};
pub use frame_loop::{FrameLoop, LoopStats, TickOutcome};
pub use selection::{RecognitionState, SelectionPolicy};
pub use source::{PoseSource, RecordedFrame, ReplaySource, SourceError};

#[derive(Debug)]
pub enum FingerspellError {
    Estimator(EstimatorError),
    Gesture(GestureError),
    ThreadPool(rayon::ThreadPoolBuildError),
    Source(SourceError),
    Io(std::io::Error),
    InvalidThreshold(f32),
    InvalidTickInterval,
    InvalidThreadCount,
}

impl std::fmt::Display for FingerspellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FingerspellError::Estimator(e) => write!(f, "Estimator error: {}", e),
            FingerspellError::Gesture(e) => write!(f, "Gesture error: {}", e),
            FingerspellError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            FingerspellError::Source(e) => write!(f, "{}", e),
            FingerspellError::Io(e) => write!(f, "I/O error: {}", e),
            FingerspellError::InvalidThreshold(t) => write!(f, "Threshold {} outside [0, 10]", t),
            FingerspellError::InvalidTickInterval => write!(f, "Tick interval must be greater than 0"),
            FingerspellError::InvalidThreadCount => write!(f, "Thread count must be greater than 0"),
        }
    }
}

impl std::error::Error for FingerspellError {}

impl From<EstimatorError> for FingerspellError {
    fn from(err: EstimatorError) -> Self {
        FingerspellError::Estimator(err)
    }
}

impl From<GestureError> for FingerspellError {
    fn from(err: GestureError) -> Self {
        FingerspellError::Gesture(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for FingerspellError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        FingerspellError::ThreadPool(err)
    }
}

impl From<SourceError> for FingerspellError {
    fn from(err: SourceError) -> Self {
        FingerspellError::Source(err)
    }
}

impl From<std::io::Error> for FingerspellError {
    fn from(err: std::io::Error) -> Self {
        FingerspellError::Io(err)
    }
}

pub type FingerspellResult<T> = Result<T, FingerspellError>;

/// Matches hand predictions against the template library and decides what to display
#[derive(Debug, Clone)]
pub struct Recognizer {
    matcher: GestureMatcher,
    policy: SelectionPolicy,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::with_matcher(GestureMatcher::default(), SelectionPolicy::default())
    }
}

impl Recognizer {
    /// Create a recognizer from a validated configuration
    pub fn new(cfg: &RecognizerConfig, library: Arc<TemplateLibrary>) -> FingerspellResult<Self> {
        cfg.validate()?;
        let estimator = PoseEstimator::new(cfg.estimator.clone())?;
        Ok(Self::with_matcher(GestureMatcher::new(estimator, library), cfg.policy()))
    }

    pub fn with_matcher(matcher: GestureMatcher, policy: SelectionPolicy) -> Self {
        Self { matcher, policy }
    }

    pub fn matcher(&self) -> &GestureMatcher {
        &self.matcher
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Raw scores for one landmark set
    pub fn evaluate(&self, landmarks: &[Landmark]) -> GestureResult<MatchResult> {
        let result = self.matcher.match_landmarks(landmarks)?;
        for [finger, curl, direction] in result.pose.pose_data() {
            log::debug!("{}: {}, {}", finger, curl, direction);
        }
        for s in &result.scores {
            log::debug!("{} scored {:.2}", s.name, s.score);
        }
        Ok(result)
    }

    /// Display state for one tick. Only the first hand is matched.
    pub fn recognize(&self, hands: &[HandPrediction]) -> RecognitionState {
        let Some(hand) = hands.first() else {
            return RecognitionState::NoHandDetected;
        };
        match self.evaluate(&hand.landmarks) {
            Ok(result) => self.policy.select(&result.scores),
            Err(e) => {
                log::warn!("Discarding hand: {}", e);
                RecognitionState::NoHandDetected
            }
        }
    }

    /// Recognize recorded frames in parallel, results in input order
    pub fn recognize_batch(&self, frames: &[Vec<HandPrediction>]) -> Vec<RecognitionState> {
        frames.par_iter().map(|hands| self.recognize(hands)).collect()
    }
}
