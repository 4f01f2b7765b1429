//! Concentration game over four symbol pairs.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use super::completion::CompletionLatch;

pub const SYMBOLS: [&str; 4] = ["🐶", "🐱", "🦊", "💖"];
pub const FACE_DOWN: &str = "❓";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    fn new(symbol: &'static str) -> Self {
        Self {
            symbol,
            face_up: false,
            matched: false,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.face_up || self.matched {
            self.symbol
        } else {
            FACE_DOWN
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    Ignored,
    Revealed,
    Matched { completed: bool },
    Mismatched { first: usize, second: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchBoard {
    cards: Vec<Card>,
    first: Option<usize>,
    /// Mismatched pair waiting to be turned face-down; input is locked
    /// while this is set.
    pending: Option<(usize, usize)>,
    latch: CompletionLatch,
}

impl MatchBoard {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut symbols: Vec<&'static str> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        symbols.shuffle(rng);
        Self::from_symbols(symbols)
    }

    pub fn from_symbols(symbols: Vec<&'static str>) -> Self {
        Self {
            cards: symbols.into_iter().map(Card::new).collect(),
            first: None,
            pending: None,
            latch: CompletionLatch::default(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<(usize, usize)> {
        self.pending
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    pub fn completion_fired(&self) -> bool {
        self.latch.has_fired()
    }

    pub fn flip(&mut self, idx: usize) -> FlipOutcome {
        if self.is_locked() {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get(idx) else {
            return FlipOutcome::Ignored;
        };
        if card.matched || self.first == Some(idx) {
            return FlipOutcome::Ignored;
        }
        self.cards[idx].face_up = true;
        let Some(first) = self.first.take() else {
            self.first = Some(idx);
            return FlipOutcome::Revealed;
        };
        if self.cards[first].symbol == self.cards[idx].symbol {
            self.cards[first].matched = true;
            self.cards[idx].matched = true;
            let completed = self.all_matched() && self.latch.fire();
            FlipOutcome::Matched { completed }
        } else {
            self.pending = Some((first, idx));
            FlipOutcome::Mismatched { first, second: idx }
        }
    }

    /// Turns a mismatched pair face-down and unlocks input. A pair that is
    /// no longer pending is ignored.
    pub fn settle(&mut self, pair: (usize, usize)) -> bool {
        if self.pending != Some(pair) {
            return false;
        }
        for i in [pair.0, pair.1] {
            if let Some(card) = self.cards.get_mut(i) {
                card.face_up = false;
            }
        }
        self.pending = None;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatchAction {
    Flip(usize),
    Settle(usize, usize),
}

impl Reducible for MatchBoard {
    type Action = MatchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let changed = match action {
            MatchAction::Flip(idx) => new.flip(idx) != FlipOutcome::Ignored,
            MatchAction::Settle(a, b) => new.settle((a, b)),
        };
        if !changed {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // 🐶 🐱 🦊 💖 🐶 🐱 🦊 💖
    fn ordered() -> MatchBoard {
        MatchBoard::from_symbols(SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect())
    }

    #[test]
    fn shuffled_deck_has_four_pairs() {
        let mut rng = StdRng::seed_from_u64(42);
        let b = MatchBoard::new(&mut rng);
        assert_eq!(b.cards().len(), 8);
        for s in SYMBOLS {
            assert_eq!(b.cards().iter().filter(|c| c.symbol == s).count(), 2);
        }
        assert!(b.cards().iter().all(|c| c.label() == FACE_DOWN));
    }

    #[test]
    fn equal_pair_is_matched_permanently() {
        let mut b = ordered();
        assert_eq!(b.flip(0), FlipOutcome::Revealed);
        assert_eq!(b.flip(4), FlipOutcome::Matched { completed: false });
        assert!(b.cards()[0].matched && b.cards()[4].matched);
        assert_eq!(b.flip(0), FlipOutcome::Ignored);
        assert!(!b.is_locked());
    }

    #[test]
    fn mismatch_locks_until_settled() {
        let mut b = ordered();
        b.flip(0);
        assert_eq!(b.flip(1), FlipOutcome::Mismatched { first: 0, second: 1 });
        assert!(b.is_locked());
        assert_eq!(b.flip(2), FlipOutcome::Ignored);
        assert!(!b.cards()[2].face_up);

        assert!(b.settle((0, 1)));
        assert!(!b.is_locked());
        assert!(!b.cards()[0].face_up && !b.cards()[1].face_up);
        assert_eq!(b.flip(2), FlipOutcome::Revealed);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut b = ordered();
        b.flip(0);
        b.flip(1);
        assert!(!b.settle((1, 2)));
        assert!(b.is_locked());
        assert!(b.settle((0, 1)));
        assert!(!b.settle((0, 1)));
    }

    #[test]
    fn same_card_twice_is_ignored() {
        let mut b = ordered();
        b.flip(3);
        assert_eq!(b.flip(3), FlipOutcome::Ignored);
        assert_eq!(b.flip(7), FlipOutcome::Matched { completed: false });
    }

    #[test]
    fn completion_fires_on_last_pair_only_once() {
        let mut b = ordered();
        for i in 0..3 {
            b.flip(i);
            b.flip(i + 4);
        }
        assert!(!b.completion_fired());
        b.flip(3);
        assert_eq!(b.flip(7), FlipOutcome::Matched { completed: true });
        assert!(b.all_matched());
        assert!(b.completion_fired());
        assert_eq!(b.flip(7), FlipOutcome::Ignored);
    }

    #[test]
    fn out_of_range_flip_is_ignored() {
        let mut b = ordered();
        assert_eq!(b.flip(99), FlipOutcome::Ignored);
    }

    #[test]
    fn reducer_skips_rerender_on_ignored_flip() {
        let b = Rc::new(ordered());
        let same = b.clone().reduce(MatchAction::Settle(0, 1));
        assert!(Rc::ptr_eq(&b, &same));
        let next = b.reduce(MatchAction::Flip(0));
        assert!(next.cards()[0].face_up);
    }
}
