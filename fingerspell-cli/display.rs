//! Display layer: skeleton overlays and the recognition text

use std::path::PathBuf;

use fingerspell_core::{Finger, HandPrediction, Landmark};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::selection::RecognitionState;

mod colors {
    use image::Rgba;

    /// Landmark dots
    pub const NAVY: Rgba<u8> = Rgba([0, 0, 128, 255]);
    /// Finger chains
    pub const GOLD: Rgba<u8> = Rgba([255, 215, 0, 255]);
}

const LANDMARK_RADIUS: i32 = 5;

/// Receives the per-tick output of the frame loop
pub trait DisplaySink {
    /// Draw skeleton overlays for every detected hand
    fn draw_hands(&mut self, hands: &[HandPrediction]);
    fn show(&mut self, state: &RecognitionState);
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn draw_hands(&mut self, hands: &[HandPrediction]) {
        (**self).draw_hands(hands)
    }

    fn show(&mut self, state: &RecognitionState) {
        (**self).show(state)
    }
}

impl<D: DisplaySink> DisplaySink for Option<D> {
    fn draw_hands(&mut self, hands: &[HandPrediction]) {
        if let Some(d) = self {
            d.draw_hands(hands);
        }
    }

    fn show(&mut self, state: &RecognitionState) {
        if let Some(d) = self {
            d.show(state);
        }
    }
}

impl<A: DisplaySink, B: DisplaySink> DisplaySink for (A, B) {
    fn draw_hands(&mut self, hands: &[HandPrediction]) {
        self.0.draw_hands(hands);
        self.1.draw_hands(hands);
    }

    fn show(&mut self, state: &RecognitionState) {
        self.0.show(state);
        self.1.show(state);
    }
}

/// Prints the recognition text whenever it changes
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    last: Option<RecognitionState>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text for `state`, or `None` when it repeats the previous one
    fn render(&mut self, state: &RecognitionState) -> Option<String> {
        if self.last.as_ref() == Some(state) {
            return None;
        }
        self.last = Some(state.clone());
        Some(state.to_string())
    }
}

impl DisplaySink for ConsoleDisplay {
    fn draw_hands(&mut self, _hands: &[HandPrediction]) {}

    fn show(&mut self, state: &RecognitionState) {
        if let Some(text) = self.render(state) {
            println!("{}", text);
        }
    }
}

/// Draw every hand onto a transparent `width` x `height` canvas
pub fn render_overlay(hands: &[HandPrediction], width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for hand in hands {
        draw_hand(&mut canvas, hand);
    }
    canvas
}

/// Canvas position of `lm`, or `None` when it is not finite or lies more
/// than one canvas size beyond any edge
fn drawable(lm: &Landmark, width: u32, height: u32) -> Option<(f32, f32)> {
    let (w, h) = (width as f32, height as f32);
    let inside = lm.x.is_finite()
        && lm.y.is_finite()
        && (-w..=2.0 * w).contains(&lm.x)
        && (-h..=2.0 * h).contains(&lm.y);
    inside.then_some((lm.x, lm.y))
}

/// Gold lines along each finger chain, then a navy dot on every landmark.
/// Landmarks far off the canvas are left out along with their segments.
pub fn draw_hand(canvas: &mut RgbaImage, hand: &HandPrediction) {
    let (width, height) = canvas.dimensions();
    let points: Vec<Option<(f32, f32)>> = hand
        .landmarks
        .iter()
        .map(|lm| drawable(lm, width, height))
        .collect();

    for finger in Finger::ALL {
        for pair in finger.chain().windows(2) {
            if let (Some(Some(a)), Some(Some(b))) = (points.get(pair[0]), points.get(pair[1])) {
                draw_line_segment_mut(canvas, *a, *b, colors::GOLD);
            }
        }
    }
    for (x, y) in points.into_iter().flatten() {
        draw_filled_circle_mut(
            canvas,
            (x.round() as i32, y.round() as i32),
            LANDMARK_RADIUS,
            colors::NAVY,
        );
    }
    if hand.landmarks.iter().any(|lm| drawable(lm, width, height).is_none()) {
        log::debug!("Skipped off-canvas landmarks while drawing a hand");
    }
}

/// Saves one PNG overlay per tick into a directory
#[derive(Debug)]
pub struct OverlayRenderer {
    dir: PathBuf,
    width: u32,
    height: u32,
    frame: usize,
}

impl OverlayRenderer {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, width, height, frame: 0 })
    }

    pub fn frames_written(&self) -> usize {
        self.frame
    }

    fn next_path(&mut self) -> PathBuf {
        let path = self.dir.join(format!("frame_{:05}.png", self.frame));
        self.frame += 1;
        path
    }
}

impl DisplaySink for OverlayRenderer {
    fn draw_hands(&mut self, hands: &[HandPrediction]) {
        let canvas = render_overlay(hands, self.width, self.height);
        let path = self.next_path();
        if let Err(e) = canvas.save(&path) {
            log::warn!("Failed to save overlay {}: {}", path.display(), e);
        }
    }

    fn show(&mut self, _state: &RecognitionState) {}
}
