//! Button edge detection

use eqpt_if::ctrl::ButtonId;
use std::collections::BTreeSet;

/// Derives new-press edges from the sets of buttons held on consecutive
/// polls.
#[derive(Debug, Default, Clone)]
pub struct ButtonLatch {
    held: BTreeSet<ButtonId>,
    pending: BTreeSet<ButtonId>,
}

impl ButtonLatch {
    /// Update with the buttons held at this poll.
    ///
    /// Edges from the previous poll which weren't consumed are dropped.
    pub fn update(&mut self, held: &[ButtonId]) {
        let now: BTreeSet<ButtonId> = held.iter().copied().collect();

        self.pending = now.difference(&self.held).copied().collect();
        self.held = now;
    }

    /// Take the pending edge of a button, if there is one.
    pub fn consume(&mut self, button: ButtonId) -> bool {
        self.pending.remove(&button)
    }
}
