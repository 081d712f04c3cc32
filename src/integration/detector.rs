//! Traits for camera capture and hand landmark inference backends.

use crate::tracker::{FrameSize, HandCandidate};

use super::builder::{RawHand, build_valid};

/// One captured camera image.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Raw image bytes (format depends on the source)
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Frame size, or `None` when the source reported a zero dimension.
    pub fn size(&self) -> Option<FrameSize> {
        (self.width > 0 && self.height > 0).then(|| FrameSize::new(self.width, self.height))
    }
}

/// Camera or video source polled once per tick.
pub trait FrameSource {
    /// Grab the next frame, or `None` when nothing was delivered this tick.
    fn grab(&mut self) -> Option<Frame>;
}

/// Trait for hand landmark inference backends.
///
/// Implement this trait to connect any landmark model to the tracker.
///
/// # Example
///
/// ```ignore
/// use gesturetrack_rs::{HandCandidate, LandmarkSource};
///
/// struct MyLandmarker {
///     // Your model here
/// }
///
/// impl LandmarkSource for MyLandmarker {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<HandCandidate>, Self::Error> {
///         // Run inference and return up to two hands
///         Ok(vec![])
///     }
/// }
/// ```
pub trait LandmarkSource {
    /// Error type for inference failures.
    type Error;

    /// Run inference on raw image data and return hand candidates.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<HandCandidate>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `HandCandidate`.
///
/// Malformed hands are dropped rather than reported, so nothing loosely
/// typed reaches the tracker.
pub trait IntoHandCandidates {
    fn into_hand_candidates(self) -> Vec<HandCandidate>;
}

impl IntoHandCandidates for Vec<HandCandidate> {
    fn into_hand_candidates(self) -> Vec<HandCandidate> {
        self
    }
}

impl IntoHandCandidates for Vec<RawHand> {
    fn into_hand_candidates(self) -> Vec<HandCandidate> {
        build_valid(&self)
    }
}
