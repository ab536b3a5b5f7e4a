use std::collections::HashSet;

use fingerspell_core::{Finger, FingerCurl, FingerDirection};
use crate::error::{GestureError, GestureResult};
use crate::template::{GestureTemplate, TemplateBuilder};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered set of templates with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLibrary {
    templates: Vec<GestureTemplate>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<GestureTemplate>) -> GestureResult<Self> {
        if templates.is_empty() {
            return Err(GestureError::EmptyLibrary);
        }
        {
            let mut seen = HashSet::new();
            if let Some(dup) = templates.iter().find(|t| !seen.insert(t.name())) {
                return Err(GestureError::DuplicateTemplate(dup.name().to_string()));
            }
        }
        log::trace!("Template library with {} entries", templates.len());
        Ok(Self { templates })
    }

    /// Letters A to D
    pub fn fingerspelling() -> Self {
        let curled = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

        let a = curled.iter().fold(
            TemplateBuilder::new("A")
                .add_curl(Finger::Thumb, FingerCurl::NoCurl, 1.0)
                .add_direction(Finger::Thumb, FingerDirection::DiagonalUpRight, 0.70),
            |b, &f| {
                b.add_curl(f, FingerCurl::FullCurl, 1.0)
                    .add_direction(f, FingerDirection::VerticalUp, 0.70)
            },
        );

        let b = Finger::ALL.iter().fold(TemplateBuilder::new("B"), |b, &f| {
            b.add_curl(f, FingerCurl::NoCurl, 1.0)
                .add_direction(f, FingerDirection::VerticalUp, 0.70)
        });

        let c = Finger::ALL.iter().fold(TemplateBuilder::new("C"), |b, &f| {
            b.add_curl(f, FingerCurl::HalfCurl, 1.0)
                .add_direction(f, FingerDirection::DiagonalUpRight, 0.70)
        });

        let d = [Finger::Thumb, Finger::Middle, Finger::Ring, Finger::Pinky].iter().fold(
            TemplateBuilder::new("D")
                .add_curl(Finger::Index, FingerCurl::NoCurl, 1.0)
                .add_direction(Finger::Index, FingerDirection::VerticalUp, 0.70),
            |b, &f| {
                b.add_curl(f, FingerCurl::FullCurl, 1.0)
                    .add_direction(f, FingerDirection::VerticalUp, 0.70)
            },
        );

        Self {
            templates: vec![a.build(), b.build(), c.build(), d.build()],
        }
    }

    pub fn templates(&self) -> &[GestureTemplate] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&GestureTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::fingerspelling()
    }
}

/// `add_curl` as a record
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurlRule {
    pub finger: Finger,
    pub curl: FingerCurl,
    pub weight: f32,
}

/// `add_direction` as a record
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRule {
    pub finger: Finger,
    pub direction: FingerDirection,
    pub weight: f32,
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerWeight {
    pub finger: Finger,
    pub weight: f32,
}

/// Serializable form of one template
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub curls: Vec<CurlRule>,
    pub directions: Vec<DirectionRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finger_weights: Vec<FingerWeight>,
}

#[cfg(feature = "serde")]
impl TemplateSpec {
    pub fn from_template(template: &GestureTemplate) -> Self {
        let mut spec = Self {
            name: template.name().to_string(),
            curls: Vec::new(),
            directions: Vec::new(),
            finger_weights: Vec::new(),
        };
        for finger in Finger::ALL {
            let rules = template.rules(finger);
            spec.curls.extend(
                rules.curls.iter().map(|&(curl, weight)| CurlRule { finger, curl, weight }),
            );
            spec.directions.extend(
                rules.directions.iter().map(|&(direction, weight)| DirectionRule { finger, direction, weight }),
            );
            if rules.weight != 1.0 {
                spec.finger_weights.push(FingerWeight { finger, weight: rules.weight });
            }
        }
        spec
    }

    /// Replay the records through `TemplateBuilder`, validating the result
    pub fn into_template(self) -> GestureResult<GestureTemplate> {
        let builder = TemplateBuilder::new(self.name);
        let builder = self.curls.into_iter()
            .fold(builder, |b, r| b.add_curl(r.finger, r.curl, r.weight));
        let builder = self.directions.into_iter()
            .fold(builder, |b, r| b.add_direction(r.finger, r.direction, r.weight));
        let builder = self.finger_weights.into_iter()
            .fold(builder, |b, r| b.finger_weight(r.finger, r.weight));
        builder.try_build()
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LibraryFile {
    templates: Vec<TemplateSpec>,
}

#[cfg(feature = "serde")]
impl TemplateLibrary {
    pub fn to_specs(&self) -> Vec<TemplateSpec> {
        self.templates.iter().map(TemplateSpec::from_template).collect()
    }

    pub fn from_specs(specs: Vec<TemplateSpec>) -> GestureResult<Self> {
        let templates = specs.into_iter()
            .map(TemplateSpec::into_template)
            .collect::<GestureResult<Vec<_>>>()?;
        Self::new(templates)
    }

    fn to_file(&self) -> LibraryFile {
        LibraryFile { templates: self.to_specs() }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_file())
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Ok(Self::from_specs(file.templates)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.to_file())
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file: LibraryFile = toml::from_str(toml_str)?;
        Ok(Self::from_specs(file.templates)?)
    }

    /// Save library to JSON file
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load library from JSON file
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save library to TOML file
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load library from TOML file
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load by extension: `.json` is JSON, anything else TOML
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let library = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path)?,
            _ => Self::load_toml(path)?,
        };
        log::debug!("Loaded {} templates from {}", library.len(), path.display());
        Ok(library)
    }
}
