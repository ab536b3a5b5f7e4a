use fingerspell_core::{Finger, FingerCurl, FingerDirection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accumulated orientation votes for one finger
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionVotes {
    pub vertical: f32,
    pub diagonal: f32,
    pub horizontal: f32,
}

impl DirectionVotes {
    pub(crate) fn add(&mut self, other: DirectionVotes) {
        self.vertical += other.vertical;
        self.diagonal += other.diagonal;
        self.horizontal += other.horizontal;
    }

    pub(crate) fn axis(&self) -> Axis {
        if self.vertical >= self.diagonal && self.vertical >= self.horizontal {
            Axis::Vertical
        } else if self.horizontal >= self.diagonal {
            Axis::Horizontal
        } else {
            Axis::Diagonal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Vertical,
    Diagonal,
    Horizontal,
}

/// Curl and direction estimate for a single finger
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FingerPose {
    pub finger: Finger,
    /// Angle at the middle joint in degrees, 180 = straight
    pub curl_angle: f32,
    pub curl: FingerCurl,
    pub votes: DirectionVotes,
    pub direction: FingerDirection,
}

/// Per-finger estimates for one hand, indexed by `Finger::index`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseEstimate {
    pub fingers: [FingerPose; 5],
}

impl PoseEstimate {
    pub fn finger(&self, finger: Finger) -> &FingerPose {
        &self.fingers[finger.index()]
    }

    pub fn curl(&self, finger: Finger) -> FingerCurl {
        self.fingers[finger.index()].curl
    }

    pub fn direction(&self, finger: Finger) -> FingerDirection {
        self.fingers[finger.index()].direction
    }

    /// Build an estimate straight from classifications, without geometry
    pub fn from_classes(classes: [(FingerCurl, FingerDirection); 5]) -> Self {
        let fingers = std::array::from_fn(|i| {
            let (curl, direction) = classes[i];
            FingerPose {
                finger: Finger::ALL[i],
                curl_angle: match curl {
                    FingerCurl::NoCurl => 180.0,
                    FingerCurl::HalfCurl => 90.0,
                    FingerCurl::FullCurl => 0.0,
                },
                curl,
                votes: DirectionVotes::default(),
                direction,
            }
        });
        Self { fingers }
    }

    /// Human readable (finger, curl, direction) rows
    pub fn pose_data(&self) -> Vec<[&'static str; 3]> {
        self.fingers
            .iter()
            .map(|fp| [fp.finger.as_str(), fp.curl.as_str(), fp.direction.as_str()])
            .collect()
    }
}
