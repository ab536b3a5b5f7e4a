//! Finger pose estimation.
//!
//! Turns the 21 landmarks of one hand into a curl classification and a
//! pointing direction for every finger. Curl comes from the joint angle at
//! the middle of each finger; direction from a weighted vote over the
//! finger's extent ratio, its overall slope and the slope of each segment.

pub mod builder;
pub mod config;
pub mod curl;
pub mod direction;
pub mod error;
pub mod estimator;
pub mod geometry;
pub mod types;

pub use builder::EstimatorBuilder;
pub use config::EstimatorConfig;
pub use error::{EstimatorError, EstimatorResult};
pub use estimator::PoseEstimator;
pub use types::{DirectionVotes, FingerPose, PoseEstimate};
