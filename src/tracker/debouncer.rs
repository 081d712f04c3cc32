//! Sliding-window debouncer turning flickering raw labels into a stable one.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::classifier::{Cursor, GestureLabel, RawClassification};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Number of recent raw labels considered (K)
    pub window_size: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window_size: 4 }
    }
}

/// FIFO of the last K raw labels.
///
/// A label becomes stable once it holds at least K-1 of the window. Without
/// such a supermajority the most recent raw label is used.
#[derive(Debug, Clone)]
pub struct TemporalDebouncer {
    window: VecDeque<GestureLabel>,
    capacity: usize,
    stable: Option<GestureLabel>,
}

impl Default for TemporalDebouncer {
    fn default() -> Self {
        Self::new(&DebounceConfig::default())
    }
}

impl TemporalDebouncer {
    pub fn new(config: &DebounceConfig) -> Self {
        let capacity = config.window_size.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
            stable: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Labels in the window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = GestureLabel> + '_ {
        self.window.iter().copied()
    }

    /// Most frequent label and its count; ties go to the more recent label.
    fn modal(&self) -> Option<(GestureLabel, usize)> {
        let mut best: Option<(GestureLabel, usize)> = None;
        for &label in self.window.iter().rev() {
            let count = self.window.iter().filter(|&&l| l == label).count();
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best
    }

    /// Append a raw label and return the stable label.
    pub fn push(&mut self, raw: GestureLabel) -> GestureLabel {
        self.window.push_back(raw);
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }

        let stable = match self.modal() {
            Some((label, count)) if count + 1 >= self.capacity => label,
            _ => raw,
        };

        if self.stable != Some(stable) {
            debug!(from = ?self.stable, to = %stable, "stable gesture changed");
            self.stable = Some(stable);
        }
        stable
    }

    /// Stabilize a raw classification.
    ///
    /// The real cursor is emitted only when the stable label agrees with this
    /// tick's raw label; idle never carries a cursor.
    pub fn resolve(&mut self, raw: &RawClassification) -> (GestureLabel, Cursor) {
        let stable = self.push(raw.label);
        let cursor = if stable == raw.label && stable != GestureLabel::Idle {
            raw.cursor
        } else {
            Cursor::SENTINEL
        };
        (stable, cursor)
    }

    /// Last stable label, if any tick was pushed since the last clear.
    pub fn stable(&self) -> Option<GestureLabel> {
        self.stable
    }

    pub fn clear(&mut self) {
        self.window.clear();
        self.stable = None;
    }
}
