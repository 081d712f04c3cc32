//! Velocity-adaptive low-pass filter for landmark jitter.
//!
//! Heavy smoothing while the hand is still, light smoothing while it moves.
//! Each element of the input vector is filtered independently, so the same
//! filter handles a single 2-D point or all 63 coordinates of a hand.

use std::f32::consts::PI;

use nalgebra::Point2;
use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::landmark::HandCandidate;

/// Tunables of the adaptive filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    /// Cutoff frequency (Hz) at rest; lower is smoother
    pub min_cutoff: f32,
    /// Cutoff increase per unit of speed; higher means less lag when moving
    pub beta: f32,
    /// Cutoff frequency (Hz) for the derivative estimate
    pub d_cutoff: f32,
    /// Smooth the active hand's landmarks before the cursor is placed
    pub enabled: bool,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            min_cutoff: 1.0,
            beta: 0.1,
            d_cutoff: 1.0,
            enabled: true,
        }
    }
}

/// Blend weight of the new sample for a given step and cutoff.
#[inline]
fn smoothing_factor(dt: f32, cutoff: f32) -> f32 {
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / dt)
}

#[derive(Debug, Clone)]
struct FilterState {
    x_prev: Array1<f32>,
    dx_prev: Array1<f32>,
    t_prev: f64,
}

/// Adaptive low-pass filter over a fixed-length vector.
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    min_cutoff: f32,
    beta: f32,
    d_cutoff: f32,
    state: Option<FilterState>,
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(&SmootherConfig::default())
    }
}

impl OneEuroFilter {
    pub fn new(config: &SmootherConfig) -> Self {
        Self {
            min_cutoff: config.min_cutoff,
            beta: config.beta,
            d_cutoff: config.d_cutoff,
            state: None,
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Filter one sample taken at `timestamp` seconds.
    ///
    /// The first sample after construction or [`reset`](Self::reset) is
    /// returned unchanged. A non-increasing timestamp returns the previous
    /// filtered value.
    pub fn smooth(&mut self, point: &Array1<f32>, timestamp: f64) -> Array1<f32> {
        let fresh = self
            .state
            .as_ref()
            .is_none_or(|s| s.x_prev.len() != point.len());
        if fresh {
            self.state = Some(FilterState {
                x_prev: point.clone(),
                dx_prev: Array1::zeros(point.len()),
                t_prev: timestamp,
            });
            return point.clone();
        }
        let Some(state) = self.state.as_mut() else {
            return point.clone();
        };

        let dt = (timestamp - state.t_prev) as f32;
        if dt <= 0.0 || !dt.is_finite() {
            return state.x_prev.clone();
        }

        // Derivative estimate, smoothed with the fixed derivative cutoff.
        let a_d = smoothing_factor(dt, self.d_cutoff);
        let dx = (point - &state.x_prev) / dt;
        let dx_hat = &dx * a_d + &state.dx_prev * (1.0 - a_d);

        let (min_cutoff, beta) = (self.min_cutoff, self.beta);
        let filtered = Zip::from(point)
            .and(&state.x_prev)
            .and(&dx_hat)
            .map_collect(|&x, &prev, &d| {
                let cutoff = min_cutoff + beta * d.abs();
                let a = smoothing_factor(dt, cutoff);
                a * x + (1.0 - a) * prev
            });

        state.x_prev = filtered.clone();
        state.dx_prev = dx_hat;
        state.t_prev = timestamp;

        filtered
    }

    /// Filter a 2-D point.
    pub fn smooth_point(&mut self, point: Point2<f32>, timestamp: f64) -> Point2<f32> {
        let out = self.smooth(&Array1::from_vec(vec![point.x, point.y]), timestamp);
        Point2::new(out[0], out[1])
    }

    /// Drop all history; the next sample passes through unchanged.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Adaptive filter applied to every landmark of the active hand.
#[derive(Debug, Clone)]
pub struct HandSmoother {
    filter: OneEuroFilter,
    enabled: bool,
}

impl Default for HandSmoother {
    fn default() -> Self {
        Self::new(&SmootherConfig::default())
    }
}

impl HandSmoother {
    pub fn new(config: &SmootherConfig) -> Self {
        Self {
            filter: OneEuroFilter::new(config),
            enabled: config.enabled,
        }
    }

    pub fn smooth(&mut self, hand: &HandCandidate, timestamp: f64) -> HandCandidate {
        if !self.enabled {
            return hand.clone();
        }
        let filtered = self.filter.smooth(&hand.to_array(), timestamp);
        hand.with_array(&filtered)
    }

    pub fn reset(&mut self) {
        if self.filter.is_initialized() {
            debug!("landmark smoothing reset");
        }
        self.filter.reset();
    }
}
