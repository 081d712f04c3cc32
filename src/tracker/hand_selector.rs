//! Hand identity selection across ticks.
//!
//! Picks at most one candidate per tick. While unlocked, the hand nearest the
//! frame center wins; once locked, the hand nearest the last wrist position is
//! followed, and a jump larger than the configured threshold counts as a lost
//! tick instead of a silent switch to another hand.

use nalgebra::Point2;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::landmark::{HandCandidate, frame_center};
use crate::tracker::lock_state::LockState;

/// Configuration for the [`HandSelector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Largest wrist displacement (normalized units) still treated as the same hand.
    pub jump_threshold: f32,
    /// Consecutive lost ticks tolerated before the lock is released.
    pub max_lost_frames: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            jump_threshold: 0.3,
            max_lost_frames: 15,
        }
    }
}

/// Identity of the followed hand, persisted across ticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedHandState {
    /// Wrist position of the last successful selection, `None` when unlocked
    pub last_wrist: Option<Point2<f32>>,
    /// Consecutive ticks without a usable match
    pub lost_frames: u32,
    pub state: LockState,
}

impl TrackedHandState {
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    fn lock(&mut self, wrist: Point2<f32>) {
        self.last_wrist = Some(wrist);
        self.lost_frames = 0;
        self.state = LockState::Locked;
    }

    fn mark_lost(&mut self) {
        self.lost_frames += 1;
        self.state = LockState::Lost;
    }

    fn unlock(&mut self) {
        self.last_wrist = None;
        self.lost_frames = 0;
        self.state = LockState::Unlocked;
    }
}

/// What happened to the lock during one call to [`HandSelector::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Unlocked selector locked onto the candidate nearest the frame center
    Acquired,
    /// Locked selector matched the followed hand again
    Tracked,
    /// No usable match, lock retained
    Lost,
    /// No usable match for too long; the lock was dropped and smoothing must restart
    Released,
    /// Unlocked and nothing to lock onto
    Searching,
}

/// Result of a selection: index into the candidate slice plus lock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: Option<usize>,
    pub outcome: SelectionOutcome,
}

impl Selection {
    #[inline]
    pub fn requires_reset(&self) -> bool {
        self.outcome == SelectionOutcome::Released
    }
}

/// Distance from `anchor` to each candidate's wrist in normalized coordinates.
pub fn wrist_distances(anchor: Point2<f32>, candidates: &[HandCandidate]) -> Array1<f32> {
    candidates
        .iter()
        .map(|c| nalgebra::distance(&anchor, &c.wrist().xy()))
        .collect()
}

fn argmin(values: &Array1<f32>) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Single-hand selector owning the [`TrackedHandState`].
#[derive(Debug, Clone, Default)]
pub struct HandSelector {
    config: SelectorConfig,
    state: TrackedHandState,
}

impl HandSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            state: TrackedHandState::default(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackedHandState {
        &self.state
    }

    /// Pick the active candidate for this tick, updating the lock in place.
    pub fn select(&mut self, candidates: &[HandCandidate]) -> Selection {
        let locked = self.state.is_locked();
        let anchor = self.state.last_wrist.unwrap_or_else(frame_center);
        let dists = wrist_distances(anchor, candidates);

        match argmin(&dists) {
            Some((index, dist)) if !locked || dist <= self.config.jump_threshold => {
                let wrist = candidates[index].wrist().xy();
                let outcome = if locked {
                    SelectionOutcome::Tracked
                } else {
                    debug!(x = wrist.x, y = wrist.y, "hand lock acquired");
                    SelectionOutcome::Acquired
                };
                self.state.lock(wrist);
                Selection {
                    index: Some(index),
                    outcome,
                }
            }
            Some((_, dist)) => {
                debug!(
                    distance = dist,
                    threshold = self.config.jump_threshold,
                    "hand jump rejected"
                );
                self.record_lost()
            }
            None => self.record_lost(),
        }
    }

    fn record_lost(&mut self) -> Selection {
        if !self.state.is_locked() {
            return Selection {
                index: None,
                outcome: SelectionOutcome::Searching,
            };
        }

        self.state.mark_lost();
        let outcome = if self.state.lost_frames > self.config.max_lost_frames {
            debug!(lost_frames = self.state.lost_frames, "hand lock released");
            self.state.unlock();
            SelectionOutcome::Released
        } else {
            SelectionOutcome::Lost
        };

        Selection {
            index: None,
            outcome,
        }
    }

    /// Forget the followed hand immediately.
    pub fn reset(&mut self) {
        self.state.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::landmark::{Handedness, LANDMARK_COUNT, Landmark};

    fn hand_at(x: f32, y: f32) -> HandCandidate {
        let mut landmarks = [Landmark::new(x, y - 0.1, 0.0); LANDMARK_COUNT];
        landmarks[0] = Landmark::new(x, y, 0.0);
        HandCandidate::new(landmarks, Handedness::Unknown)
    }

    #[test]
    fn test_unlocked_prefers_frame_center() {
        let mut selector = HandSelector::default();
        let candidates = [hand_at(0.1, 0.1), hand_at(0.55, 0.5), hand_at(0.9, 0.9)];

        let sel = selector.select(&candidates);
        assert_eq!(sel.index, Some(1));
        assert_eq!(sel.outcome, SelectionOutcome::Acquired);
        assert_eq!(selector.state().state, LockState::Locked);
        assert_eq!(selector.state().last_wrist, Some(Point2::new(0.55, 0.5)));
    }

    #[test]
    fn test_locked_follows_last_wrist() {
        let mut selector = HandSelector::default();
        selector.select(&[hand_at(0.3, 0.5)]);

        // The new center hand is closer to the frame center but farther from the lock.
        let sel = selector.select(&[hand_at(0.5, 0.5), hand_at(0.32, 0.52)]);
        assert_eq!(sel.index, Some(1));
        assert_eq!(sel.outcome, SelectionOutcome::Tracked);
    }

    #[test]
    fn test_jump_is_treated_as_lost() {
        let mut selector = HandSelector::default();
        selector.select(&[hand_at(0.2, 0.5)]);

        let sel = selector.select(&[hand_at(0.8, 0.5)]);
        assert_eq!(sel.index, None);
        assert_eq!(sel.outcome, SelectionOutcome::Lost);
        assert_eq!(selector.state().lost_frames, 1);
        assert_eq!(selector.state().last_wrist, Some(Point2::new(0.2, 0.5)));
    }

    #[test]
    fn test_release_after_max_lost_frames() {
        let config = SelectorConfig {
            max_lost_frames: 3,
            ..SelectorConfig::default()
        };
        let mut selector = HandSelector::new(config);
        selector.select(&[hand_at(0.2, 0.5)]);

        for _ in 0..3 {
            assert_eq!(selector.select(&[]).outcome, SelectionOutcome::Lost);
        }
        let sel = selector.select(&[]);
        assert!(sel.requires_reset());
        assert_eq!(selector.state().state, LockState::Unlocked);
        assert_eq!(selector.state().last_wrist, None);

        assert_eq!(selector.select(&[]).outcome, SelectionOutcome::Searching);
    }

    #[test]
    fn test_match_resets_lost_counter() {
        let mut selector = HandSelector::default();
        selector.select(&[hand_at(0.4, 0.4)]);
        selector.select(&[]);
        selector.select(&[]);
        assert_eq!(selector.state().lost_frames, 2);

        let sel = selector.select(&[hand_at(0.42, 0.4)]);
        assert_eq!(sel.outcome, SelectionOutcome::Tracked);
        assert_eq!(selector.state().lost_frames, 0);
        assert_eq!(selector.state().state, LockState::Locked);
    }

    #[test]
    fn test_wrist_distances() {
        let d = wrist_distances(Point2::new(0.5, 0.5), &[hand_at(0.5, 0.5), hand_at(0.8, 0.9)]);
        assert_eq!(d.len(), 2);
        assert!(d[0].abs() < 1e-6);
        assert!((d[1] - 0.5).abs() < 1e-6);
    }
}
