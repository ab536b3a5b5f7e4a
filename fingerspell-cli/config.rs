use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fingerspell_core::default_threads;
use fingerspell_gesture::TemplateLibrary;
use fingerspell_pose::EstimatorConfig;
use serde::{Deserialize, Serialize};

use crate::selection::SelectionPolicy;
use crate::{FingerspellError, FingerspellResult};

/// Settings for the recognizer and its frame loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Minimum score (inclusive) for a template to be reported
    pub threshold: f32,
    pub tick_interval_ms: u64,
    /// Worker threads for batch evaluation
    pub n_threads: usize,
    /// Template library file, built-in letters when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    pub estimator: EstimatorConfig,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            threshold: SelectionPolicy::DEFAULT_THRESHOLD,
            tick_interval_ms: 150,
            n_threads: default_threads(),
            templates: None,
            estimator: EstimatorConfig::default(),
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> FingerspellResult<()> {
        self.estimator.validate()?;
        if !(0.0..=10.0).contains(&self.threshold) {
            return Err(FingerspellError::InvalidThreshold(self.threshold));
        }
        if self.tick_interval_ms == 0 {
            return Err(FingerspellError::InvalidTickInterval);
        }
        if self.n_threads == 0 {
            return Err(FingerspellError::InvalidThreadCount);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy::new(self.threshold)
    }

    /// Load the configured template file, or the built-in letters
    pub fn library(&self) -> Result<Arc<TemplateLibrary>, Box<dyn std::error::Error>> {
        let library = match &self.templates {
            Some(path) => TemplateLibrary::load(path)?,
            None => TemplateLibrary::fingerspelling(),
        };
        Ok(Arc::new(library))
    }

    pub fn summary(&self) -> String {
        format!(
            "RecognizerConfig: threshold={:.2}, tick={}ms, threads={}, templates={}\n  {}",
            self.threshold,
            self.tick_interval_ms,
            self.n_threads,
            self.templates
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
            self.estimator.summary()
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, JSON for `.json` and TOML otherwise
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Save configuration to file, JSON for `.json` and TOML otherwise
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.to_json()?,
            _ => self.to_toml()?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RecognizerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold, 8.5);
        assert_eq!(cfg.tick_interval(), Duration::from_millis(150));
        assert!(cfg.n_threads >= 1);
        assert_eq!(cfg.library().unwrap().names(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_validation() {
        let mut cfg = RecognizerConfig::default();
        cfg.threshold = 10.5;
        assert!(matches!(cfg.validate(), Err(FingerspellError::InvalidThreshold(_))));

        let mut cfg = RecognizerConfig::default();
        cfg.tick_interval_ms = 0;
        assert!(matches!(cfg.validate(), Err(FingerspellError::InvalidTickInterval)));

        let mut cfg = RecognizerConfig::default();
        cfg.n_threads = 0;
        assert!(matches!(cfg.validate(), Err(FingerspellError::InvalidThreadCount)));

        let mut cfg = RecognizerConfig::default();
        cfg.estimator.no_curl_start_limit = 30.0;
        assert!(matches!(cfg.validate(), Err(FingerspellError::Estimator(_))));
    }

    #[test]
    fn test_partial_toml() {
        let cfg = RecognizerConfig::from_toml(
            r#"
            threshold = 7.0
            tick_interval_ms = 100

            [estimator]
            no_curl_start_limit = 140.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.threshold, 7.0);
        assert_eq!(cfg.tick_interval_ms, 100);
        assert_eq!(cfg.estimator.no_curl_start_limit, 140.0);
        assert_eq!(cfg.estimator.half_curl_start_limit, 60.0);
        assert!(cfg.templates.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut cfg = RecognizerConfig::default();
        cfg.templates = Some(PathBuf::from("letters.toml"));
        cfg.estimator = EstimatorConfig::relaxed_preset();
        let back = RecognizerConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
        assert!(RecognizerConfig::from_json(r#"{"threshold": -1.0}"#).is_err());
    }

    #[test]
    fn test_missing_template_file() {
        let mut cfg = RecognizerConfig::default();
        cfg.templates = Some(PathBuf::from("/nonexistent/letters.toml"));
        assert!(cfg.library().is_err());
    }
}
