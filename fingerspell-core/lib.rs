#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of landmarks reported for one hand
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Joint chain per finger: wrist followed by four joints, base to tip
pub const FINGER_CHAINS: [[usize; 5]; 5] = [
    [WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [WRIST, INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [WRIST, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [WRIST, RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [WRIST, PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Landmark ≙ one joint or fingertip, image pixel coordinates (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f32; 3]", into = "[f32; 3]"))]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f32; 3] {
    fn from(lm: Landmark) -> Self {
        [lm.x, lm.y, lm.z]
    }
}

/// Axis-aligned box around a detected hand
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub top_left: (f32, f32),
    pub bottom_right: (f32, f32),
}

/// One hand as reported by the pose source
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "HandRecord"))]
pub struct HandPrediction {
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    pub landmarks: Vec<Landmark>,
}

/// Wire form of a hand; the box is recomputed from the landmarks when absent
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HandRecord {
    confidence: f32,
    #[serde(default)]
    bounding_box: Option<BoundingBox>,
    landmarks: Vec<Landmark>,
}

#[cfg(feature = "serde")]
impl From<HandRecord> for HandPrediction {
    fn from(record: HandRecord) -> Self {
        let bounding_box = record
            .bounding_box
            .unwrap_or_else(|| bounding_box_of(&record.landmarks));
        Self {
            confidence: record.confidence,
            bounding_box,
            landmarks: record.landmarks,
        }
    }
}

impl HandPrediction {
    pub fn new(confidence: f32, landmarks: Vec<Landmark>) -> Self {
        let bounding_box = bounding_box_of(&landmarks);
        Self {
            confidence,
            bounding_box,
            landmarks,
        }
    }
}

/// Tight 2D box around the given landmarks (zero box when empty)
pub fn bounding_box_of(landmarks: &[Landmark]) -> BoundingBox {
    let mut iter = landmarks.iter();
    let Some(first) = iter.next() else {
        return BoundingBox::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for lm in iter {
        min_x = min_x.min(lm.x);
        min_y = min_y.min(lm.y);
        max_x = max_x.max(lm.x);
        max_y = max_y.max(lm.y);
    }
    BoundingBox {
        top_left: (min_x, min_y),
        bottom_right: (max_x, max_y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Position of the finger in `ALL` and in per-finger arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn chain(self) -> [usize; 5] {
        FINGER_CHAINS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        }
    }
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl FingerCurl {
    pub const ALL: [FingerCurl; 3] = [FingerCurl::NoCurl, FingerCurl::HalfCurl, FingerCurl::FullCurl];

    pub fn as_str(&self) -> &'static str {
        match self {
            FingerCurl::NoCurl => "No Curl",
            FingerCurl::HalfCurl => "Half Curl",
            FingerCurl::FullCurl => "Full Curl",
        }
    }
}

impl std::fmt::Display for FingerCurl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FingerDirection {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpRight,
    DiagonalUpLeft,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl FingerDirection {
    pub const ALL: [FingerDirection; 8] = [
        FingerDirection::VerticalUp,
        FingerDirection::VerticalDown,
        FingerDirection::HorizontalLeft,
        FingerDirection::HorizontalRight,
        FingerDirection::DiagonalUpRight,
        FingerDirection::DiagonalUpLeft,
        FingerDirection::DiagonalDownRight,
        FingerDirection::DiagonalDownLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FingerDirection::VerticalUp => "Vertical Up",
            FingerDirection::VerticalDown => "Vertical Down",
            FingerDirection::HorizontalLeft => "Horizontal Left",
            FingerDirection::HorizontalRight => "Horizontal Right",
            FingerDirection::DiagonalUpRight => "Diagonal Up Right",
            FingerDirection::DiagonalUpLeft => "Diagonal Up Left",
            FingerDirection::DiagonalDownRight => "Diagonal Down Right",
            FingerDirection::DiagonalDownLeft => "Diagonal Down Left",
        }
    }
}

impl std::fmt::Display for FingerDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default worker count for batch evaluation
pub fn default_threads() -> usize {
    num_cpus::get().max(1)
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finger_chains_start_at_wrist() {
        for finger in Finger::ALL {
            let chain = finger.chain();
            assert_eq!(chain[0], WRIST);
            assert_eq!(chain[4], 4 * (finger.index() + 1));
        }
    }

    #[test]
    fn test_bounding_box() {
        let lms = vec![
            Landmark::new(10.0, 40.0, 0.0),
            Landmark::new(-5.0, 12.0, 3.0),
            Landmark::new(30.0, 20.0, -1.0),
        ];
        let bb = bounding_box_of(&lms);
        assert_eq!(bb.top_left, (-5.0, 12.0));
        assert_eq!(bb.bottom_right, (30.0, 40.0));
        assert_eq!(bounding_box_of(&[]), BoundingBox::default());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Finger::Pinky.to_string(), "Pinky");
        assert_eq!(FingerCurl::HalfCurl.to_string(), "Half Curl");
        assert_eq!(FingerDirection::DiagonalUpRight.to_string(), "Diagonal Up Right");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_landmark_wire_format() {
        let hand: HandPrediction = serde_json::from_str(
            r#"{"confidence": 0.9, "landmarks": [[1.0, 2.0, 3.0]]}"#,
        )
        .unwrap();
        assert_eq!(hand.landmarks, vec![Landmark::new(1.0, 2.0, 3.0)]);
        let json = serde_json::to_string(&Landmark::new(4.0, 5.0, 6.0)).unwrap();
        assert_eq!(json, "[4.0,5.0,6.0]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_missing_bounding_box_recomputed() {
        let hand: HandPrediction = serde_json::from_str(
            r#"{"confidence": 0.8, "landmarks": [[10.0, 40.0, 0.0], [-5.0, 12.0, 0.0]]}"#,
        )
        .unwrap();
        assert_eq!(hand.bounding_box.top_left, (-5.0, 12.0));
        assert_eq!(hand.bounding_box.bottom_right, (10.0, 40.0));
        assert_eq!(hand, HandPrediction::new(0.8, hand.landmarks.clone()));

        let boxed: HandPrediction = serde_json::from_str(
            r#"{"confidence": 0.8, "bounding_box": {"top_left": [0.0, 0.0], "bottom_right": [1.0, 1.0]},
                "landmarks": [[10.0, 40.0, 0.0]]}"#,
        )
        .unwrap();
        assert_eq!(boxed.bounding_box.bottom_right, (1.0, 1.0));

        let back: HandPrediction = serde_json::from_str(&serde_json::to_string(&hand).unwrap()).unwrap();
        assert_eq!(back, hand);
    }
}
