//! Rolling-window FPS and latency reporting for status displays.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Default number of ticks kept in the window.
pub const DEFAULT_WINDOW: usize = 100;

/// Rolling statistics over the current window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSnapshot {
    /// Ticks per second across the window, 0 until two ticks are recorded
    pub fps: f32,
    /// Mean per-tick processing time in milliseconds
    pub latency_ms: f32,
    /// Total ticks recorded since construction or the last reset
    pub frames: u64,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    started: Instant,
    elapsed: Duration,
}

/// Tick timing collector with a bounded window.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    samples: VecDeque<Sample>,
    window_size: usize,
    frames: u64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl MetricsCollector {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(2);
        Self {
            samples: VecDeque::with_capacity(window_size + 1),
            window_size,
            frames: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Record one tick that started at `start` and finished at `end`.
    pub fn record(&mut self, start: Instant, end: Instant) -> MetricsSnapshot {
        self.samples.push_back(Sample {
            started: start,
            elapsed: end.saturating_duration_since(start),
        });
        while self.samples.len() > self.window_size {
            self.samples.pop_front();
        }
        self.frames += 1;
        self.snapshot()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let fps = match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) if self.samples.len() >= 2 => {
                let span = last.started.saturating_duration_since(first.started);
                if span.is_zero() {
                    0.0
                } else {
                    (self.samples.len() - 1) as f32 / span.as_secs_f32()
                }
            }
            _ => 0.0,
        };

        let latency_ms = if self.samples.is_empty() {
            0.0
        } else {
            let total: Duration = self.samples.iter().map(|s| s.elapsed).sum();
            total.as_secs_f32() * 1000.0 / self.samples.len() as f32
        };

        MetricsSnapshot {
            fps,
            latency_ms,
            frames: self.frames,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_single_sample_has_no_fps() {
        let mut m = MetricsCollector::default();
        let t0 = Instant::now();
        let snap = m.record(t0, t0 + ms(4));
        assert_eq!(snap.fps, 0.0);
        assert_relative_eq!(snap.latency_ms, 4.0, epsilon = 1e-3);
        assert_eq!(snap.frames, 1);
    }

    #[test]
    fn test_steady_cadence() {
        let mut m = MetricsCollector::default();
        let t0 = Instant::now();
        let mut snap = MetricsSnapshot::default();
        for i in 0..11 {
            let start = t0 + ms(20 * i);
            snap = m.record(start, start + ms(2 + i % 2 * 2));
        }
        // 10 intervals over 200 ms
        assert_relative_eq!(snap.fps, 50.0, epsilon = 1e-2);
        assert!(snap.latency_ms > 2.0 && snap.latency_ms < 4.0);
        assert_eq!(snap.frames, 11);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut m = MetricsCollector::new(3);
        let t0 = Instant::now();
        for i in 0..10 {
            let start = t0 + ms(10 * i);
            m.record(start, start + ms(i));
        }
        let snap = m.snapshot();
        assert_eq!(snap.frames, 10);
        // Only ticks 7, 8 and 9 remain.
        assert_relative_eq!(snap.latency_ms, 8.0, epsilon = 1e-3);
        assert_relative_eq!(snap.fps, 100.0, epsilon = 1e-2);
    }

    #[test]
    fn test_reset() {
        let mut m = MetricsCollector::default();
        let t0 = Instant::now();
        m.record(t0, t0);
        m.reset();
        assert_eq!(m.snapshot(), MetricsSnapshot::default());
    }
}
