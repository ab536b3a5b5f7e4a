use crate::config::EstimatorConfig;
use crate::error::EstimatorResult;
use crate::estimator::PoseEstimator;

/// Builder for creating a `PoseEstimator`
#[derive(Debug, Clone, Default)]
pub struct EstimatorBuilder {
    config: EstimatorConfig,
}

impl EstimatorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Joint angle (degrees) above which a finger counts as half curled
    pub fn half_curl_start(mut self, degrees: f32) -> Self {
        self.config.half_curl_start_limit = degrees;
        self
    }

    /// Joint angle (degrees) above which a finger counts as straight
    pub fn no_curl_start(mut self, degrees: f32) -> Self {
        self.config.no_curl_start_limit = degrees;
        self
    }

    pub fn distance_vote_power(mut self, power: f32) -> Self {
        self.config.distance_vote_power = power;
        self
    }

    pub fn single_angle_vote_power(mut self, power: f32) -> Self {
        self.config.single_angle_vote_power = power;
        self
    }

    pub fn total_angle_vote_power(mut self, power: f32) -> Self {
        self.config.total_angle_vote_power = power;
        self
    }

    /// Apply the relaxed preset
    pub fn preset_relaxed(mut self) -> Self {
        self.config = EstimatorConfig::relaxed_preset();
        self
    }

    /// Build the `PoseEstimator`
    pub fn build(self) -> EstimatorResult<PoseEstimator> {
        PoseEstimator::new(self.config)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.config.summary()
    }

    /// Create a builder from an existing `EstimatorConfig`
    pub fn from_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Convert the builder into an `EstimatorConfig`
    pub fn to_config(self) -> EstimatorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;

    #[test]
    fn test_builder_overrides() {
        let estimator = EstimatorBuilder::new()
            .half_curl_start(45.0)
            .no_curl_start(150.0)
            .total_angle_vote_power(2.0)
            .build()
            .unwrap();
        let cfg = estimator.config();
        assert_eq!(cfg.half_curl_start_limit, 45.0);
        assert_eq!(cfg.no_curl_start_limit, 150.0);
        assert_eq!(cfg.total_angle_vote_power, 2.0);
        assert_eq!(cfg.distance_vote_power, 1.1);
    }

    #[test]
    fn test_builder_validates() {
        let result = EstimatorBuilder::new().half_curl_start(170.0).build();
        assert!(matches!(result, Err(EstimatorError::InvalidCurlLimits { .. })));
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = EstimatorConfig::relaxed_preset();
        let back = cfg.clone().to_builder().to_config();
        assert_eq!(back, cfg);
    }
}
