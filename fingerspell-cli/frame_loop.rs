//! Periodic, strictly sequential sampling of the pose source.
//!
//! Each tick samples the source, recognizes the first hand and pushes the
//! result to the display. A tick is awaited to completion before the timer
//! is polled again, and deadlines missed while a tick overran are skipped.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::Recognizer;
use crate::display::DisplaySink;
use crate::selection::RecognitionState;
use crate::source::{PoseSource, SourceError};

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Source frame not ready, nothing sampled
    Skipped,
    /// Source rejected the frame, display left untouched
    Failed(SourceError),
    Completed(RecognitionState),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub skipped: u64,
    pub failed: u64,
    pub recognized: u64,
}

impl LoopStats {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Skipped => self.skipped += 1,
            TickOutcome::Failed(_) => self.failed += 1,
            TickOutcome::Completed(RecognitionState::Recognized(_)) => self.recognized += 1,
            TickOutcome::Completed(_) => {}
        }
    }
}

impl std::fmt::Display for LoopStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ticks ({} skipped, {} failed, {} recognized)",
            self.ticks, self.skipped, self.failed, self.recognized
        )
    }
}

pub struct FrameLoop<S, D> {
    source: S,
    display: D,
    recognizer: Recognizer,
    period: Duration,
    state: RecognitionState,
    stats: LoopStats,
}

impl<S: PoseSource, D: DisplaySink> FrameLoop<S, D> {
    pub fn new(source: S, display: D, recognizer: Recognizer, period: Duration) -> Self {
        Self {
            source,
            display,
            recognizer,
            period,
            state: RecognitionState::Waiting,
            stats: LoopStats::default(),
        }
    }

    /// Last state pushed to the display
    pub fn state(&self) -> &RecognitionState {
        &self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_parts(self) -> (S, D) {
        (self.source, self.display)
    }

    /// Sample the source once and update the display
    pub async fn tick(&mut self) -> TickOutcome {
        let outcome = self.sample().await;
        self.stats.record(&outcome);
        outcome
    }

    async fn sample(&mut self) -> TickOutcome {
        if !self.source.is_ready() {
            log::trace!("Pose source not ready, skipping tick");
            return TickOutcome::Skipped;
        }

        let hands = match self.source.estimate_hands().await {
            Ok(hands) => hands,
            Err(e) => {
                log::warn!("{}; keeping '{}'", e, self.state);
                return TickOutcome::Failed(e);
            }
        };

        let state = self.recognizer.recognize(&hands);
        self.display.draw_hands(&hands);
        self.display.show(&state);
        if state != self.state {
            log::debug!("Recognition state: {} -> {}", self.state, state);
            self.state = state.clone();
        }
        TickOutcome::Completed(state)
    }

    /// Tick every period until `shutdown` resolves. A tick still in flight
    /// at that point is dropped.
    pub async fn run<F: Future<Output = ()>>(&mut self, shutdown: F) -> LoopStats {
        log::info!("Frame loop started, ticking every {:?}", self.period);
        self.display.show(&self.state);

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = interval.tick() => {}
            }
            let finished = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                outcome = self.tick() => Some(outcome),
            };
            if finished.is_none() {
                log::debug!("Shutdown during tick, result discarded");
                break;
            }
        }

        log::info!("Frame loop stopped after {}", self.stats);
        self.stats
    }
}
