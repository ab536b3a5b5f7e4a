use crate::error::{EstimatorError, EstimatorResult};
use crate::builder::EstimatorBuilder;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// Thresholds and vote weights for pose estimation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Joint angles above this (degrees) are at most half curled
    pub half_curl_start_limit: f32,
    /// Joint angles above this (degrees) are not curled
    pub no_curl_start_limit: f32,
    /// Vote weight of the vertical/horizontal extent ratio
    pub distance_vote_power: f32,
    /// Vote weight of each individual segment slope
    pub single_angle_vote_power: f32,
    /// Vote weight of the whole-finger slope
    pub total_angle_vote_power: f32,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            half_curl_start_limit: 60.0,
            no_curl_start_limit: 130.0,
            distance_vote_power: 1.1,
            single_angle_vote_power: 0.9,
            total_angle_vote_power: 1.6,
            name: None,
            description: None,
        }
    }
}

impl EstimatorConfig {
    /// Wider straight-finger band for jittery webcam tracks
    pub fn relaxed_preset() -> Self {
        Self {
            half_curl_start_limit: 50.0,
            no_curl_start_limit: 120.0,
            name: Some("Relaxed".to_string()),
            description: Some("Tolerates noisy landmark tracks from low resolution cameras".to_string()),
            ..Self::default()
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }

    /// Convert to EstimatorBuilder for further customization
    pub fn to_builder(self) -> EstimatorBuilder {
        EstimatorBuilder::from_config(self)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "EstimatorConfig: curl limits=[half:{:.1}°, none:{:.1}°], votes=[distance:{:.2}, segment:{:.2}, total:{:.2}]",
            self.half_curl_start_limit, self.no_curl_start_limit,
            self.distance_vote_power, self.single_angle_vote_power, self.total_angle_vote_power
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> EstimatorResult<()> {
        let half = self.half_curl_start_limit;
        let none = self.no_curl_start_limit;
        if !(half.is_finite() && none.is_finite()) || half <= 0.0 || half >= none || none > 180.0 {
            return Err(EstimatorError::InvalidCurlLimits {
                half_curl_start: half,
                no_curl_start: none,
            });
        }

        let powers = [
            ("distance_vote_power", self.distance_vote_power),
            ("single_angle_vote_power", self.single_angle_vote_power),
            ("total_angle_vote_power", self.total_angle_vote_power),
        ];
        for (name, value) in powers {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimatorError::InvalidVotePower { name, value });
            }
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
