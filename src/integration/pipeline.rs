//! GesturePipeline for combining capture and landmark inference with tracking.

use std::fmt::Debug;
use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use crate::config::GestureConfig;
use crate::tracker::{Cursor, GestureLabel, GestureTracker, TrackedGesture};

use super::detector::{Frame, FrameSource, LandmarkSource};
use super::metrics::{MetricsCollector, MetricsSnapshot};

/// The only externally visible output of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameResult {
    pub gesture: GestureLabel,
    /// Cursor in camera pixels, `-1` when there is no valid cursor
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub fps: f32,
    pub latency_ms: f32,
    pub is_tracking: bool,
    /// Two-hand scale factor, 1.0 unless the gesture is settled on `scale`
    pub scale_factor: f32,
}

impl Default for FrameResult {
    fn default() -> Self {
        Self {
            gesture: GestureLabel::Idle,
            cursor_x: Cursor::SENTINEL.x,
            cursor_y: Cursor::SENTINEL.y,
            fps: 0.0,
            latency_ms: 0.0,
            is_tracking: false,
            scale_factor: 1.0,
        }
    }
}

impl FrameResult {
    pub fn from_tracked(tracked: &TrackedGesture, metrics: MetricsSnapshot) -> Self {
        Self {
            gesture: tracked.gesture,
            cursor_x: tracked.cursor.x,
            cursor_y: tracked.cursor.y,
            fps: metrics.fps,
            latency_ms: metrics.latency_ms,
            is_tracking: tracked.is_tracking,
            scale_factor: tracked.scale.map_or(1.0, |s| s.scale_factor),
        }
    }

    /// Idle result of a tick that delivered no usable frame.
    pub fn capture_failure(metrics: MetricsSnapshot) -> Self {
        Self {
            fps: metrics.fps,
            latency_ms: metrics.latency_ms,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.cursor_x, self.cursor_y)
    }
}

/// A combined pipeline that bundles capture and landmark inference with the
/// gesture tracker.
///
/// Owns every piece of state mutated across ticks, so independent pipelines
/// never interfere.
pub struct GesturePipeline<F: FrameSource, D: LandmarkSource> {
    source: F,
    detector: D,
    tracker: GestureTracker,
    metrics: MetricsCollector,
    epoch: Instant,
}

impl<F: FrameSource, D: LandmarkSource> GesturePipeline<F, D> {
    /// Create a new pipeline with the given source, detector and config.
    pub fn new(source: F, detector: D, config: &GestureConfig) -> Self {
        Self {
            source,
            detector,
            tracker: GestureTracker::new(config),
            metrics: MetricsCollector::default(),
            epoch: Instant::now(),
        }
    }

    /// Create a new pipeline with the default configuration.
    pub fn with_default_config(source: F, detector: D) -> Self {
        Self::new(source, detector, &GestureConfig::default())
    }

    /// Run landmark inference on `frame` and advance the tracker.
    ///
    /// Frame dimensions, when present, replace the configured frame size for
    /// cursor scaling. Inference errors are returned before any tracking
    /// state changes.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameResult, D::Error> {
        let start = Instant::now();
        let hands = self.detector.detect(&frame.data, frame.width, frame.height)?;
        if let Some(size) = frame.size() {
            self.tracker.set_frame_size(size);
        }

        let timestamp = start.duration_since(self.epoch).as_secs_f64();
        let tracked = self.tracker.update(&hands, timestamp);
        let metrics = self.metrics.record(start, Instant::now());
        Ok(FrameResult::from_tracked(&tracked, metrics))
    }

    /// One timer tick: grab a frame and process it.
    ///
    /// A missing frame or a failed inference skips tracking entirely and
    /// leaves every piece of state untouched.
    pub fn tick(&mut self) -> FrameResult
    where
        D::Error: Debug,
    {
        let Some(frame) = self.source.grab() else {
            return FrameResult::capture_failure(self.metrics.snapshot());
        };

        match self.process_frame(&frame) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = ?err, "landmark inference failed");
                FrameResult::capture_failure(self.metrics.snapshot())
            }
        }
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut GestureTracker {
        &mut self.tracker
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
