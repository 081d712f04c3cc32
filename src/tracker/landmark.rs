//! Hand landmark representation with pixel scaling utilities.
//!
//! Landmarks follow the 21-point hand model:
//! - x, y: normalized to [0, 1] relative to frame width and height
//! - z: relative depth, more negative means closer to the camera

use nalgebra::Point2;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of landmarks describing one hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Frame center in normalized coordinates.
#[inline]
pub fn frame_center() -> Point2<f32> {
    Point2::new(0.5, 0.5)
}

/// Pixel dimensions of the camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

/// A single normalized 3-D keypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// Horizontal position, 0.0 at the left edge, 1.0 at the right edge
    pub x: f32,
    /// Vertical position, 0.0 at the top edge, 1.0 at the bottom edge
    pub y: f32,
    /// Relative depth
    pub z: f32,
}

impl Landmark {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position projected onto the image plane.
    #[inline]
    pub fn xy(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance to `other` in the image plane.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        nalgebra::distance(&self.xy(), &other.xy())
    }

    /// Scale to pixel coordinates, truncating toward zero.
    #[inline]
    pub fn to_pixels(&self, frame: FrameSize) -> (i32, i32) {
        (
            (self.x * frame.width as f32) as i32,
            (self.y * frame.height as f32) as i32,
        )
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Arithmetic mean of a set of landmarks.
    pub fn mean(points: &[Landmark]) -> Landmark {
        if points.is_empty() {
            return Landmark::default();
        }
        let n = points.len() as f32;
        let (sx, sy, sz) = points.iter().fold((0.0, 0.0, 0.0), |(sx, sy, sz), p| {
            (sx + p.x, sy + p.y, sz + p.z)
        });
        Landmark::new(sx / n, sy / n, sz / n)
    }
}

/// Which hand the detector believes a candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    /// Parse a detector label such as `"Left"` or `"right"`.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("left") {
            Self::Left
        } else if label.eq_ignore_ascii_case("right") {
            Self::Right
        } else {
            Self::Unknown
        }
    }
}

/// One detected hand for the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct HandCandidate {
    landmarks: [Landmark; LANDMARK_COUNT],
    handedness: Handedness,
}

impl HandCandidate {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    #[inline]
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    #[inline]
    pub fn landmark(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    #[inline]
    pub fn wrist(&self) -> Landmark {
        self.landmarks[WRIST]
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Flatten to `[x0, y0, z0, x1, ...]` for filtering.
    pub fn to_array(&self) -> Array1<f32> {
        self.landmarks
            .iter()
            .flat_map(|lm| [lm.x, lm.y, lm.z])
            .collect()
    }

    /// Copy of this candidate with coordinates taken from a flat array.
    ///
    /// The array must hold `3 * LANDMARK_COUNT` values; missing trailing
    /// values keep the original coordinates.
    pub fn with_array(&self, values: &Array1<f32>) -> HandCandidate {
        let mut landmarks = self.landmarks;
        for (lm, chunk) in landmarks
            .iter_mut()
            .zip(values.as_slice().unwrap_or(&[]).chunks_exact(3))
        {
            *lm = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        HandCandidate {
            landmarks,
            handedness: self.handedness,
        }
    }
}
