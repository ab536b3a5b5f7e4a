use fingerspell_core::{Finger, FingerCurl, FingerDirection};
use fingerspell_pose::PoseEstimate;
use crate::error::{GestureError, GestureResult};

/// Highest score a template can award
pub const MAX_SCORE: f32 = 10.0;

/// Expected curls and directions for one finger, each with a confidence weight
#[derive(Debug, Clone, PartialEq)]
pub struct FingerRules {
    pub curls: Vec<(FingerCurl, f32)>,
    pub directions: Vec<(FingerDirection, f32)>,
    /// Relative importance of this finger within the template
    pub weight: f32,
}

impl Default for FingerRules {
    fn default() -> Self {
        Self {
            curls: Vec::new(),
            directions: Vec::new(),
            weight: 1.0,
        }
    }
}

/// Best weight among the rules matching `detected`, and the best weight overall
fn best_weight<T: PartialEq + Copy>(rules: &[(T, f32)], detected: T) -> (f32, f32) {
    rules.iter().fold((0.0f32, 0.0f32), |(hit, max), &(expected, weight)| {
        let hit = if expected == detected { hit.max(weight) } else { hit };
        (hit, max.max(weight))
    })
}

impl FingerRules {
    /// Achieved and attainable contribution of this finger for one observed curl/direction
    pub fn contribution(&self, curl: FingerCurl, direction: FingerDirection) -> (f32, f32) {
        let (curl_hit, curl_max) = best_weight(&self.curls, curl);
        let (dir_hit, dir_max) = best_weight(&self.directions, direction);
        (
            self.weight * (curl_hit + dir_hit),
            self.weight * (curl_max + dir_max),
        )
    }
}

/// Scoring rubric for one symbol. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTemplate {
    name: String,
    fingers: [FingerRules; 5],
}

impl GestureTemplate {
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self, finger: Finger) -> &FingerRules {
        &self.fingers[finger.index()]
    }

    /// Score a pose against this template, 0 (nothing matches) to 10 (every rule at full weight)
    pub fn score(&self, pose: &PoseEstimate) -> f32 {
        let (achieved, attainable) = Finger::ALL.iter().fold((0.0f32, 0.0f32), |(a, t), &finger| {
            let (hit, max) = self.rules(finger).contribution(pose.curl(finger), pose.direction(finger));
            (a + hit, t + max)
        });

        if attainable <= 0.0 {
            return 0.0;
        }
        (achieved / attainable * MAX_SCORE).clamp(0.0, MAX_SCORE)
    }
}

/// Declarative template construction, one rule per call
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    name: String,
    fingers: [FingerRules; 5],
}

impl TemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingers: Default::default(),
        }
    }

    /// Expect `curl` on `finger` with confidence `weight`
    pub fn add_curl(mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Self {
        self.fingers[finger.index()].curls.push((curl, weight));
        self
    }

    /// Expect `direction` on `finger` with confidence `weight`
    pub fn add_direction(mut self, finger: Finger, direction: FingerDirection, weight: f32) -> Self {
        self.fingers[finger.index()].directions.push((direction, weight));
        self
    }

    /// Relative importance of `finger` when combining finger scores
    pub fn finger_weight(mut self, finger: Finger, weight: f32) -> Self {
        self.fingers[finger.index()].weight = weight;
        self
    }

    /// Build the template, checking every rule
    pub fn try_build(self) -> GestureResult<GestureTemplate> {
        for finger in Finger::ALL {
            let rules = &self.fingers[finger.index()];
            if rules.curls.is_empty() {
                return Err(GestureError::MissingCurlRule { template: self.name, finger });
            }
            if rules.directions.is_empty() {
                return Err(GestureError::MissingDirectionRule { template: self.name, finger });
            }
            let weights = rules.curls.iter().map(|&(_, w)| w)
                .chain(rules.directions.iter().map(|&(_, w)| w));
            for weight in weights {
                if !(0.0..=1.0).contains(&weight) {
                    return Err(GestureError::WeightOutOfRange { template: self.name, finger, weight });
                }
            }
            if !rules.weight.is_finite() || rules.weight < 0.0 {
                return Err(GestureError::InvalidFingerWeight {
                    template: self.name,
                    finger,
                    weight: rules.weight,
                });
            }
        }

        Ok(GestureTemplate {
            name: self.name,
            fingers: self.fingers,
        })
    }

    /// Build a template that is known to be well formed.
    ///
    /// # Panics
    /// If a finger lacks a curl or direction rule, or a weight is out of range.
    pub fn build(self) -> GestureTemplate {
        match self.try_build() {
            Ok(template) => template,
            Err(e) => panic!("malformed gesture template: {}", e),
        }
    }
}
