//! Builder for creating `HandCandidate` objects from raw detector output.

use tracing::warn;

use crate::error::LandmarkError;
use crate::tracker::{FrameSize, HandCandidate, Handedness, LANDMARK_COUNT, Landmark};

/// Builder for creating `HandCandidate` objects from loosely-typed
/// detector output.
///
/// Coordinates may be given normalized (the usual landmark model output) or
/// in pixels together with the frame size they were measured in.
#[derive(Debug, Clone, Default)]
pub struct HandCandidateBuilder {
    points: Vec<[f32; 3]>,
    handedness: Handedness,
    pixel_frame: Option<FrameSize>,
}

impl HandCandidateBuilder {
    /// Create a new candidate builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set landmarks as normalized `[x, y, z]` triples.
    pub fn points(mut self, points: &[[f32; 3]]) -> Self {
        self.points = points.to_vec();
        self
    }

    /// Set landmarks from a flat `[x0, y0, z0, x1, ...]` slice.
    ///
    /// A trailing partial triple is padded with NaN, so [`build`](Self::build)
    /// rejects it instead of silently inventing a coordinate.
    pub fn flat(mut self, values: &[f32]) -> Self {
        self.points = values
            .chunks(3)
            .map(|c| {
                [
                    c.first().copied().unwrap_or(f32::NAN),
                    c.get(1).copied().unwrap_or(f32::NAN),
                    c.get(2).copied().unwrap_or(f32::NAN),
                ]
            })
            .collect();
        self
    }

    /// Set landmarks as pixel `[x, y, z]` triples measured in `frame`.
    pub fn pixels(mut self, points: &[[f32; 3]], frame: FrameSize) -> Self {
        self.points = points.to_vec();
        self.pixel_frame = Some(frame);
        self
    }

    /// Set handedness from a detector label such as `"Left"`.
    pub fn handedness(mut self, label: &str) -> Self {
        self.handedness = Handedness::from_label(label);
        self
    }

    /// Build the final `HandCandidate`.
    pub fn build(self) -> Result<HandCandidate, LandmarkError> {
        if self.points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongLandmarkCount {
                expected: LANDMARK_COUNT,
                got: self.points.len(),
            });
        }

        let (sx, sy) = match self.pixel_frame {
            Some(frame) if frame.width == 0 || frame.height == 0 => {
                return Err(LandmarkError::InvalidFrameSize {
                    width: frame.width,
                    height: frame.height,
                });
            }
            Some(frame) => (1.0 / frame.width as f32, 1.0 / frame.height as f32),
            None => (1.0, 1.0),
        };

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (index, (slot, &[x, y, z])) in landmarks.iter_mut().zip(&self.points).enumerate() {
            let lm = Landmark::new(x * sx, y * sy, z);
            if !lm.is_finite() {
                return Err(LandmarkError::NonFinite { index });
            }
            *slot = lm;
        }

        Ok(HandCandidate::new(landmarks, self.handedness))
    }
}

/// One hand as emitted by a detector backend before validation.
#[derive(Debug, Clone, Default)]
pub struct RawHand {
    /// Normalized `[x, y, z]` triples
    pub landmarks: Vec<[f32; 3]>,
    pub handedness: String,
}

impl RawHand {
    pub fn build(&self) -> Result<HandCandidate, LandmarkError> {
        HandCandidateBuilder::new()
            .points(&self.landmarks)
            .handedness(&self.handedness)
            .build()
    }
}

/// Convert raw hands, dropping malformed ones with a warning.
pub(crate) fn build_valid(hands: &[RawHand]) -> Vec<HandCandidate> {
    hands
        .iter()
        .filter_map(|raw| match raw.build() {
            Ok(hand) => Some(hand),
            Err(err) => {
                warn!(error = %err, "dropping malformed hand candidate");
                None
            }
        })
        .collect()
}
