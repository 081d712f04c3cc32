//! Per-tick orchestration: select, smooth, classify, debounce.

use tracing::trace;

use crate::config::GestureConfig;
use crate::tracker::classifier::{
    Cursor, FingerExtension, GestureClassifier, GestureLabel, RawClassification, ScaleReading,
};
use crate::tracker::debouncer::TemporalDebouncer;
use crate::tracker::hand_selector::{HandSelector, SelectionOutcome, TrackedHandState};
use crate::tracker::landmark::{FrameSize, HandCandidate};
use crate::tracker::one_euro::HandSmoother;

/// Stable output of one tracking tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedGesture {
    /// Debounced gesture
    pub gesture: GestureLabel,
    /// Cursor in camera pixels, sentinel unless the gesture is settled
    pub cursor: Cursor,
    /// Undebounced label of this tick
    pub raw: GestureLabel,
    /// Finger extension of the active hand, all false without one
    pub fingers: FingerExtension,
    /// Two-hand measurement, only when both the stable and the raw label are `scale`
    pub scale: Option<ScaleReading>,
    /// Whether a hand was selected this tick
    pub is_tracking: bool,
    pub selection: SelectionOutcome,
}

/// Single-hand gesture tracker. Owns all state mutated across ticks.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    selector: HandSelector,
    smoother: HandSmoother,
    classifier: GestureClassifier,
    debouncer: TemporalDebouncer,
    frame_size: FrameSize,
    frame_id: u64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            selector: HandSelector::new(config.selector.clone()),
            smoother: HandSmoother::new(&config.smoother),
            classifier: GestureClassifier::new(config.classifier.clone()),
            debouncer: TemporalDebouncer::new(&config.debounce),
            frame_size: config.frame,
            frame_id: 0,
        }
    }

    /// Run one tick over this tick's candidates, `timestamp` in seconds.
    pub fn update(&mut self, candidates: &[HandCandidate], timestamp: f64) -> TrackedGesture {
        self.frame_id += 1;

        let selection = self.selector.select(candidates);
        if selection.requires_reset() {
            self.smoother.reset();
        }

        let (raw, scale) = match selection.index {
            Some(index) => {
                let active = &candidates[index];
                let other = candidates
                    .iter()
                    .enumerate()
                    .find(|&(i, _)| i != index)
                    .map(|(_, c)| c);
                // Finger geometry is read from the raw landmarks so smoothing
                // lag never delays a gesture change. Single-hand cursors come
                // from the smoothed hand; the scale midpoint pairs both raw wrists.
                let smoothed = self.smoother.smooth(active, timestamp);
                let (mut raw, scale) = self
                    .classifier
                    .classify_with_pair(active, other, self.frame_size);
                if raw.label != GestureLabel::Scale {
                    raw.cursor = self
                        .classifier
                        .cursor_for(raw.label, &smoothed, other, self.frame_size);
                }
                (raw, scale)
            }
            None => (RawClassification::idle(), None),
        };

        let (gesture, cursor) = self.debouncer.resolve(&raw);
        trace!(
            frame = self.frame_id,
            raw = %raw.label,
            stable = %gesture,
            "gesture tick"
        );

        TrackedGesture {
            gesture,
            cursor,
            raw: raw.label,
            fingers: raw.fingers,
            scale: if gesture == GestureLabel::Scale && raw.label == GestureLabel::Scale {
                scale
            } else {
                None
            },
            is_tracking: selection.index.is_some(),
            selection: selection.outcome,
        }
    }

    /// Pixel size used for cursor scaling.
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    pub fn set_frame_size(&mut self, frame_size: FrameSize) {
        self.frame_size = frame_size;
    }

    pub fn hand_state(&self) -> &TrackedHandState {
        self.selector.state()
    }

    pub fn debouncer(&self) -> &TemporalDebouncer {
        &self.debouncer
    }

    /// Number of ticks processed.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Drop lock, smoothing history and debounce window.
    pub fn reset(&mut self) {
        self.selector.reset();
        self.smoother.reset();
        self.debouncer.clear();
    }
}
