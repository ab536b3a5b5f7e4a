//! Gesture templates and weighted matching.
//!
//! A template lists, per finger, which curls and directions it expects and
//! how confident that expectation is. The matcher estimates the pose of a
//! landmark set once and scores it against every template of a shared
//! library, returning all scores in library order.

pub mod error;
pub mod library;
pub mod matcher;
pub mod template;

pub use error::{GestureError, GestureResult};
pub use library::TemplateLibrary;
#[cfg(feature = "serde")]
pub use library::{CurlRule, DirectionRule, FingerWeight, TemplateSpec};
pub use matcher::{GestureMatcher, GestureScore, MatchResult, best_score};
pub use template::{FingerRules, GestureTemplate, TemplateBuilder, MAX_SCORE};
