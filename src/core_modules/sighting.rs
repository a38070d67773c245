/// Session-wide record of whether the weapon was ever seen.
///
/// The flag only moves from `false` to `true`. Nothing resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SightingFlag {
    seen: bool,
}

impl SightingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one frame's outcome into the flag.
    /// Returns `true` only on the frame that first sets it.
    pub fn record(&mut self, detected: bool) -> bool {
        let first = detected && !self.seen;
        self.seen |= detected;
        first
    }

    pub fn is_set(&self) -> bool {
        self.seen
    }
}
