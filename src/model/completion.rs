use serde::{Deserialize, Serialize};

/// Single-fire guard shared by every mini-game.
///
/// A game calls [`CompletionLatch::fire`] each time it observes its win
/// condition; only the first call reports `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionLatch {
    fired: bool,
}

impl CompletionLatch {
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_once() {
        let mut latch = CompletionLatch::default();
        assert!(!latch.has_fired());
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }
}
