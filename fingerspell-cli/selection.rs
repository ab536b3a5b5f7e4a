use fingerspell_gesture::{GestureScore, best_score};

/// What the display shows after a tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecognitionState {
    /// No tick has completed yet
    #[default]
    Waiting,
    Recognized(String),
    NotRecognized,
    NoHandDetected,
}

impl RecognitionState {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            RecognitionState::Recognized(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecognitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognitionState::Waiting => write!(f, "Waiting for gesture..."),
            RecognitionState::Recognized(name) => write!(f, "Recognized: {}", name),
            RecognitionState::NotRecognized => write!(f, "Not recognized"),
            RecognitionState::NoHandDetected => write!(f, "No hand detected"),
        }
    }
}

/// Picks the best candidate and applies the acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    threshold: f32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self { threshold: Self::DEFAULT_THRESHOLD }
    }
}

impl SelectionPolicy {
    pub const DEFAULT_THRESHOLD: f32 = 8.5;

    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Top score wins if it reaches the threshold (inclusive); earliest candidate on ties
    pub fn select(&self, scores: &[GestureScore]) -> RecognitionState {
        match best_score(scores) {
            Some(b) if b.score >= self.threshold => RecognitionState::Recognized(b.name.clone()),
            _ => RecognitionState::NotRecognized,
        }
    }
}
