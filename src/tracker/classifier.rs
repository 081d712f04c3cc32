//! Per-tick gesture classification from finger-extension geometry.

use serde::{Deserialize, Serialize};

use crate::tracker::landmark::{
    FrameSize, HandCandidate, INDEX_MCP, INDEX_PIP, INDEX_TIP, Landmark, MIDDLE_PIP, MIDDLE_TIP,
    PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP, WRIST,
};

/// Discrete gesture emitted per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    #[default]
    Idle,
    Drawing,
    Erasing,
    Scale,
    Menu,
}

impl GestureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
            Self::Erasing => "erasing",
            Self::Scale => "scale",
            Self::Menu => "menu",
        }
    }
}

impl std::fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cursor position in camera pixels; `(-1, -1)` means no valid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
}

impl Cursor {
    pub const SENTINEL: Cursor = Cursor { x: -1, y: -1 };

    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    fn from_landmark(lm: Landmark, frame: FrameSize) -> Self {
        let (x, y) = lm.to_pixels(frame);
        Self { x, y }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::SENTINEL
    }
}

/// Extension state of [thumb, index, middle, ring, pinky].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerExtension(pub [bool; 5]);

impl FingerExtension {
    #[inline]
    pub fn thumb(&self) -> bool {
        self.0[0]
    }
    #[inline]
    pub fn index(&self) -> bool {
        self.0[1]
    }
    #[inline]
    pub fn middle(&self) -> bool {
        self.0[2]
    }
    #[inline]
    pub fn ring(&self) -> bool {
        self.0[3]
    }
    #[inline]
    pub fn pinky(&self) -> bool {
        self.0[4]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&e| e).count()
    }
}

/// Classification of one hand for one tick, before debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawClassification {
    pub label: GestureLabel,
    pub cursor: Cursor,
    pub fingers: FingerExtension,
}

impl RawClassification {
    /// Idle with a sentinel cursor, used when no hand is selected.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Two-hand distance measurement backing the `scale` gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleReading {
    pub scale_factor: f32,
    pub hands_distance_px: f32,
}

/// Thresholds of the finger-geometry heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A fingertip must be this many times farther from the wrist than its PIP joint
    pub extension_ratio: f32,
    /// A fingertip this much closer to the camera than its PIP joint counts as extended
    pub depth_epsilon: f32,
    /// Extended fingers needed for `erasing`
    pub erase_min_fingers: usize,
    /// Emit `scale` when a second hand is present and the active hand is idle
    pub enable_scale: bool,
    /// Wrist distance (normalized) to scale factor multiplier
    pub scale_gain: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extension_ratio: 1.1,
            depth_epsilon: 0.04,
            erase_min_fingers: 4,
            enable_scale: true,
            scale_gain: 10.0,
            scale_min: 0.5,
            scale_max: 2.0,
        }
    }
}

/// (pip, tip) landmark pairs of the four non-thumb fingers.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_PIP, INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP, RING_TIP),
    (PINKY_PIP, PINKY_TIP),
];

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Extension vector for [thumb, index, middle, ring, pinky].
    pub fn finger_extension(&self, hand: &HandCandidate) -> FingerExtension {
        let wrist = hand.wrist();
        let mut fingers = [false; 5];

        // Thumb: tip farther from the pinky base than the IP joint.
        let pinky_base = hand.landmark(PINKY_MCP);
        fingers[0] = hand.landmark(THUMB_TIP).planar_distance(&pinky_base)
            > hand.landmark(THUMB_IP).planar_distance(&pinky_base);

        for (slot, &(pip_idx, tip_idx)) in fingers[1..].iter_mut().zip(FINGER_JOINTS.iter()) {
            let pip = hand.landmark(pip_idx);
            let tip = hand.landmark(tip_idx);
            let by_length = tip.planar_distance(&wrist)
                > self.config.extension_ratio * pip.planar_distance(&wrist);
            // Pointing straight at the camera foreshortens the finger in 2-D.
            let by_depth = tip.z < pip.z - self.config.depth_epsilon;
            *slot = by_length || by_depth;
        }

        FingerExtension(fingers)
    }

    /// Decision table over the extension vector.
    pub fn label_for(&self, fingers: &FingerExtension) -> GestureLabel {
        if fingers.count() >= self.config.erase_min_fingers {
            GestureLabel::Erasing
        } else if fingers.index() && !fingers.middle() && !fingers.ring() && !fingers.pinky() {
            GestureLabel::Drawing
        } else {
            GestureLabel::Idle
        }
    }

    /// Cursor for `label` taken from `hand`, in `frame` pixels.
    ///
    /// Erasing uses the palm center (mean of wrist, index base and pinky
    /// base), drawing the index fingertip, scale the midpoint between both
    /// wrists. Anything else, or scale without a second hand, is the sentinel.
    pub fn cursor_for(
        &self,
        label: GestureLabel,
        hand: &HandCandidate,
        other: Option<&HandCandidate>,
        frame: FrameSize,
    ) -> Cursor {
        match (label, other) {
            (GestureLabel::Erasing, _) => {
                let palm = Landmark::mean(&[
                    hand.landmark(WRIST),
                    hand.landmark(INDEX_MCP),
                    hand.landmark(PINKY_MCP),
                ]);
                Cursor::from_landmark(palm, frame)
            }
            (GestureLabel::Drawing, _) => Cursor::from_landmark(hand.landmark(INDEX_TIP), frame),
            (GestureLabel::Scale, Some(other)) => {
                Cursor::from_landmark(Landmark::mean(&[hand.wrist(), other.wrist()]), frame)
            }
            _ => Cursor::SENTINEL,
        }
    }

    /// Classify a single hand and place the cursor in `frame` pixels.
    pub fn classify(&self, hand: &HandCandidate, frame: FrameSize) -> RawClassification {
        let fingers = self.finger_extension(hand);
        let label = self.label_for(&fingers);
        RawClassification {
            label,
            cursor: self.cursor_for(label, hand, None, frame),
            fingers,
        }
    }

    /// Wrist-to-wrist measurement between the active hand and a second hand.
    pub fn measure_scale(
        &self,
        active: &HandCandidate,
        other: &HandCandidate,
        frame: FrameSize,
    ) -> ScaleReading {
        let distance = active.wrist().planar_distance(&other.wrist());
        let scale_factor = (distance * self.config.scale_gain)
            .max(self.config.scale_min)
            .min(self.config.scale_max);
        ScaleReading {
            scale_factor,
            hands_distance_px: distance * frame.width as f32,
        }
    }

    /// Classify with an optional second hand.
    ///
    /// Drawing and erasing on the active hand take precedence; otherwise a
    /// second hand turns an idle tick into `scale`.
    pub fn classify_with_pair(
        &self,
        active: &HandCandidate,
        other: Option<&HandCandidate>,
        frame: FrameSize,
    ) -> (RawClassification, Option<ScaleReading>) {
        let raw = self.classify(active, frame);
        let other = match other {
            Some(other) if self.config.enable_scale && raw.label == GestureLabel::Idle => other,
            _ => return (raw, None),
        };

        let reading = self.measure_scale(active, other, frame);
        let raw = RawClassification {
            label: GestureLabel::Scale,
            cursor: self.cursor_for(GestureLabel::Scale, active, Some(other), frame),
            fingers: raw.fingers,
        };
        (raw, Some(reading))
    }
}
