/// Lock status of the tracked hand across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// No hand is followed; the next selection re-centers on the frame
    #[default]
    Unlocked,
    /// Following a hand that was matched this tick
    Locked,
    /// Still locked, but the hand was missing for one or more ticks
    Lost,
}

impl LockState {
    /// Whether a previous wrist position is still anchoring selection.
    #[inline]
    pub fn is_locked(self) -> bool {
        self != LockState::Unlocked
    }
}
