//! Single-hand tracking core: selection, smoothing, classification and
//! debouncing of per-frame hand landmark candidates.

mod classifier;
mod debouncer;
mod gesture_tracker;
mod hand_selector;
pub mod landmark;
mod lock_state;
mod one_euro;

pub use classifier::{
    ClassifierConfig, Cursor, FingerExtension, GestureClassifier, GestureLabel, RawClassification,
    ScaleReading,
};
pub use debouncer::{DebounceConfig, TemporalDebouncer};
pub use gesture_tracker::{GestureTracker, TrackedGesture};
pub use hand_selector::{
    HandSelector, Selection, SelectionOutcome, SelectorConfig, TrackedHandState, wrist_distances,
};
pub use landmark::{FrameSize, HandCandidate, Handedness, LANDMARK_COUNT, Landmark};
pub use lock_state::LockState;
pub use one_euro::{HandSmoother, OneEuroFilter, SmootherConfig};

#[cfg(test)]
pub(crate) use classifier::fixtures;
