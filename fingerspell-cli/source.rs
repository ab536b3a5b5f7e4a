use std::collections::VecDeque;
use std::future::Future;

use fingerspell_core::HandPrediction;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Upstream rejection reported by a pose source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError(pub String);

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pose source error: {}", self.0)
    }
}

impl std::error::Error for SourceError {}

/// Produces hand predictions for the current frame
pub trait PoseSource {
    /// Checked once per tick before sampling. A source that is not ready
    /// makes the frame loop skip the tick.
    fn is_ready(&mut self) -> bool {
        true
    }

    /// Hands detected in the current frame, possibly none
    fn estimate_hands(&mut self) -> impl Future<Output = Result<Vec<HandPrediction>, SourceError>> + Send;
}

/// One recorded pose-source frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default = "ready_by_default")]
    pub ready: bool,
    #[serde(default)]
    pub hands: Vec<HandPrediction>,
    /// Replayed as an upstream failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn ready_by_default() -> bool {
    true
}

impl RecordedFrame {
    pub fn hands(hands: Vec<HandPrediction>) -> Self {
        Self { ready: true, hands, error: None }
    }

    pub fn not_ready() -> Self {
        Self { ready: false, hands: Vec::new(), error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { ready: true, hands: Vec::new(), error: Some(message.into()) }
    }
}

/// Replays recorded frames, one per tick
#[derive(Debug)]
pub struct ReplaySource {
    frames: VecDeque<RecordedFrame>,
    exhausted: Option<oneshot::Sender<()>>,
}

impl ReplaySource {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self {
            frames: frames.into(),
            exhausted: None,
        }
    }

    /// Parse a JSON array of frames
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let frames: Vec<RecordedFrame> = serde_json::from_str(json)?;
        Ok(Self::new(frames))
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Resolves once the last frame has been consumed
    pub fn on_exhausted(&mut self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        if self.frames.is_empty() {
            let _ = tx.send(());
        } else {
            self.exhausted = Some(tx);
        }
        rx
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn next_frame(&mut self) -> Option<RecordedFrame> {
        let frame = self.frames.pop_front();
        if self.frames.is_empty() {
            if let Some(tx) = self.exhausted.take() {
                let _ = tx.send(());
            }
        }
        frame
    }
}

impl PoseSource for ReplaySource {
    fn is_ready(&mut self) -> bool {
        match self.frames.front() {
            Some(frame) if !frame.ready => {
                self.next_frame();
                false
            }
            _ => true,
        }
    }

    async fn estimate_hands(&mut self) -> Result<Vec<HandPrediction>, SourceError> {
        match self.next_frame() {
            Some(RecordedFrame { error: Some(message), .. }) => Err(SourceError(message)),
            Some(frame) => Ok(frame.hands),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerspell_core::Landmark;

    #[tokio::test]
    async fn test_replay_order() {
        let hand = HandPrediction::new(0.9, vec![Landmark::default(); 21]);
        let mut source = ReplaySource::new(vec![
            RecordedFrame::hands(vec![hand.clone()]),
            RecordedFrame::not_ready(),
            RecordedFrame::failure("model rejected frame"),
            RecordedFrame::hands(Vec::new()),
        ]);
        let mut done = source.on_exhausted();

        assert!(source.is_ready());
        assert_eq!(source.estimate_hands().await, Ok(vec![hand]));
        assert!(!source.is_ready());
        assert!(source.is_ready());
        assert_eq!(
            source.estimate_hands().await,
            Err(SourceError("model rejected frame".to_string()))
        );
        assert!(done.try_recv().is_err());
        assert_eq!(source.estimate_hands().await, Ok(Vec::new()));
        assert!(done.try_recv().is_ok());
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.estimate_hands().await, Ok(Vec::new()));
    }

    #[test]
    fn test_frame_json_defaults() {
        let source = ReplaySource::from_json(
            r#"[
                {"hands": []},
                {"ready": false},
                {"error": "busy"},
                {"hands": [{"confidence": 0.8, "landmarks": [[1.0, 2.0, 0.0]]}]}
            ]"#,
        )
        .unwrap();
        let frames: Vec<_> = source.frames.iter().cloned().collect();
        assert!(frames[0].ready);
        assert!(!frames[1].ready);
        assert_eq!(frames[2].error.as_deref(), Some("busy"));
        assert_eq!(frames[3].hands[0].landmarks, vec![Landmark::new(1.0, 2.0, 0.0)]);
    }

    #[test]
    fn test_empty_replay_is_exhausted_immediately() {
        let mut source = ReplaySource::new(Vec::new());
        let mut done = source.on_exhausted();
        assert!(done.try_recv().is_ok());
    }
}
