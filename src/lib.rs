//! Stable single-cursor hand gesture tracking.
//!
//! Turns a noisy per-frame stream of hand landmark detections into one
//! locked hand, a smoothed cursor and a debounced gesture label that a
//! drawing tool can act on.
//!
//! # Example
//!
//! ```
//! use gesturetrack_rs::{GestureLabel, GestureTracker};
//!
//! let mut tracker = GestureTracker::default();
//! let out = tracker.update(&[], 0.0);
//! assert_eq!(out.gesture, GestureLabel::Idle);
//! assert!(out.cursor.is_sentinel());
//! ```

pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::GestureConfig;
pub use error::{ConfigError, LandmarkError};
pub use integration::{
    CanvasPoint, Frame, FrameResult, FrameSource, GesturePipeline, HandCandidateBuilder,
    IntoHandCandidates, LandmarkSource, MetricsCollector, MetricsSnapshot, RawHand,
    StrokeCommand, StrokeConfig, StrokeController, Tool,
};
pub use tracker::{
    ClassifierConfig, Cursor, DebounceConfig, FingerExtension, FrameSize, GestureClassifier,
    GestureLabel, GestureTracker, HandCandidate, HandSelector, HandSmoother, Handedness,
    LANDMARK_COUNT, Landmark, LockState, OneEuroFilter, RawClassification, ScaleReading,
    Selection, SelectionOutcome, SelectorConfig, SmootherConfig, TemporalDebouncer,
    TrackedGesture, TrackedHandState,
};
