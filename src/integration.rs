//! Integration module for connecting capture devices and hand landmark
//! backends with the gesture tracker.
//!
//! This module provides the traits a camera and a landmark model implement,
//! the per-tick pipeline gluing them to [`GestureTracker`](crate::GestureTracker),
//! rolling metrics, and the stroke state machine consuming its output.

mod builder;
mod detector;
mod metrics;
mod pipeline;
mod stroke;

pub use builder::{HandCandidateBuilder, RawHand};
pub use detector::{Frame, FrameSource, IntoHandCandidates, LandmarkSource};
pub use metrics::{DEFAULT_WINDOW, MetricsCollector, MetricsSnapshot};
pub use pipeline::{FrameResult, GesturePipeline};
pub use stroke::{CanvasPoint, StrokeCommand, StrokeConfig, StrokeController, Tool};
