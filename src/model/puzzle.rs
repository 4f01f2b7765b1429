//! 3x3 picture puzzle: nine pieces, nine slots and a bank of unplaced pieces.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use super::completion::CompletionLatch;

pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const PIECE_COUNT: usize = GRID_COLS * GRID_ROWS;

/// A piece, identified by the slot index it belongs in (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

impl PieceId {
    pub fn image_path(self, folder: &str) -> String {
        let row = self.0 / GRID_COLS + 1;
        let col = self.0 % GRID_COLS + 1;
        format!("{}/piece_{}_{}.png", folder, row, col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Bank,
    Slot(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceStatus {
    Banked,
    Correct,
    Misplaced,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleBoard {
    slots: [Option<PieceId>; PIECE_COUNT],
    /// Unplaced pieces in display order.
    bank: Vec<PieceId>,
    pub selected: Option<PieceId>,
    pub dragging: Option<PieceId>,
    latch: CompletionLatch,
}

impl PuzzleBoard {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bank: Vec<PieceId> = (0..PIECE_COUNT).map(PieceId).collect();
        bank.shuffle(rng);
        Self::with_bank(bank)
    }

    /// Board with an explicit bank order; pieces missing from `bank` are
    /// appended in index order.
    pub fn with_bank(mut bank: Vec<PieceId>) -> Self {
        let mut seen = [false; PIECE_COUNT];
        bank.retain(|p| p.0 < PIECE_COUNT && !std::mem::replace(&mut seen[p.0], true));
        for i in 0..PIECE_COUNT {
            if !bank.contains(&PieceId(i)) {
                bank.push(PieceId(i));
            }
        }
        Self {
            slots: [None; PIECE_COUNT],
            bank,
            selected: None,
            dragging: None,
            latch: CompletionLatch::default(),
        }
    }

    pub fn bank(&self) -> &[PieceId] {
        &self.bank
    }

    pub fn occupant(&self, slot: usize) -> Option<PieceId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn location(&self, piece: PieceId) -> Option<Location> {
        if let Some(i) = self.slots.iter().position(|s| *s == Some(piece)) {
            return Some(Location::Slot(i));
        }
        self.bank.contains(&piece).then_some(Location::Bank)
    }

    pub fn status(&self, piece: PieceId) -> PieceStatus {
        match self.location(piece) {
            Some(Location::Slot(i)) if i == piece.0 => PieceStatus::Correct,
            Some(Location::Slot(_)) => PieceStatus::Misplaced,
            _ => PieceStatus::Banked,
        }
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Every slot holds the piece whose index matches its own.
    pub fn is_solved(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, s)| matches!(s, Some(p) if p.0 == i))
    }

    pub fn completion_fired(&self) -> bool {
        self.latch.has_fired()
    }

    /// Moves `piece` into `slot`. An occupant other than `piece` goes back to
    /// the bank first; a piece coming from another slot vacates it.
    pub fn place(&mut self, piece: PieceId, slot: usize) -> bool {
        if slot >= PIECE_COUNT || self.location(piece).is_none() {
            return false;
        }
        self.selected = None;
        if self.slots[slot] == Some(piece) {
            self.check_complete();
            return true;
        }
        if let Some(occupant) = self.slots[slot].take() {
            self.bank.push(occupant);
        }
        self.detach(piece);
        self.slots[slot] = Some(piece);
        self.check_complete();
        true
    }

    /// Sends a placed piece back to the bank.
    pub fn return_to_bank(&mut self, piece: PieceId) -> bool {
        match self.location(piece) {
            Some(Location::Slot(i)) => {
                self.slots[i] = None;
                self.bank.push(piece);
                if self.selected == Some(piece) {
                    self.selected = None;
                }
                self.check_complete();
                true
            }
            _ => false,
        }
    }

    /// Returns every placed piece to the bank in slot order.
    pub fn reset(&mut self) {
        for i in 0..PIECE_COUNT {
            if let Some(p) = self.slots[i].take() {
                self.bank.push(p);
            }
        }
        self.selected = None;
        self.dragging = None;
    }

    pub fn tap_piece(&mut self, piece: PieceId) -> bool {
        let Some(location) = self.location(piece) else {
            return false;
        };
        match (self.selected, location) {
            (Some(sel), _) if sel == piece => {
                self.selected = None;
                true
            }
            (Some(sel), Location::Slot(i)) => self.place(sel, i),
            (_, Location::Bank) => {
                self.selected = Some(piece);
                true
            }
            (None, Location::Slot(_)) => self.return_to_bank(piece),
        }
    }

    pub fn tap_slot(&mut self, slot: usize) -> bool {
        match self.selected {
            Some(sel) => self.place(sel, slot),
            None => false,
        }
    }

    pub fn tap_bank(&mut self) -> bool {
        match self.selected {
            Some(sel) if matches!(self.location(sel), Some(Location::Slot(_))) => {
                self.return_to_bank(sel)
            }
            Some(_) => {
                self.selected = None;
                true
            }
            None => false,
        }
    }

    pub fn begin_drag(&mut self, piece: PieceId) -> bool {
        if self.location(piece).is_none() {
            return false;
        }
        self.dragging = Some(piece);
        self.selected = None;
        true
    }

    pub fn drop_on_slot(&mut self, slot: usize) -> bool {
        match self.dragging.take() {
            Some(piece) => self.place(piece, slot),
            None => false,
        }
    }

    pub fn drop_on_bank(&mut self) -> bool {
        match self.dragging.take() {
            Some(piece) => {
                self.return_to_bank(piece);
                true
            }
            None => false,
        }
    }

    /// Drops transient drag state without moving anything.
    pub fn cancel_drag(&mut self) -> bool {
        self.dragging.take().is_some()
    }

    fn detach(&mut self, piece: PieceId) {
        self.bank.retain(|p| *p != piece);
        for s in self.slots.iter_mut() {
            if *s == Some(piece) {
                *s = None;
            }
        }
    }

    fn check_complete(&mut self) {
        if self.is_solved() {
            self.latch.fire();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleAction {
    TapPiece(PieceId),
    TapSlot(usize),
    TapBank,
    BeginDrag(PieceId),
    DropOnSlot(usize),
    DropOnBank,
    CancelDrag,
    Reset,
}

impl Reducible for PuzzleBoard {
    type Action = PuzzleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use PuzzleAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            TapPiece(piece) => new.tap_piece(piece),
            TapSlot(slot) => new.tap_slot(slot),
            TapBank => new.tap_bank(),
            BeginDrag(piece) => new.begin_drag(piece),
            DropOnSlot(slot) => new.drop_on_slot(slot),
            DropOnBank => new.drop_on_bank(),
            CancelDrag => new.cancel_drag(),
            Reset => {
                new.reset();
                true
            }
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

    fn board() -> PuzzleBoard {
        PuzzleBoard::with_bank((0..PIECE_COUNT).rev().map(PieceId).collect())
    }

    fn solve(b: &mut PuzzleBoard) {
        for i in 0..PIECE_COUNT {
            b.place(PieceId(i), i);
        }
    }

    #[test]
    fn shuffled_bank_holds_every_piece_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = PuzzleBoard::new(&mut rng);
        let mut ids: Vec<usize> = b.bank().iter().map(|p| p.0).collect();
        ids.sort();
        assert_eq!(ids, (0..PIECE_COUNT).collect::<Vec<_>>());
        assert_eq!(b.placed_count(), 0);
    }

    #[test]
    fn placing_into_occupied_slot_evicts_to_bank() {
        let mut b = board();
        assert!(b.place(PieceId(3), 0));
        assert!(b.place(PieceId(0), 0));
        assert_eq!(b.occupant(0), Some(PieceId(0)));
        assert_eq!(b.location(PieceId(3)), Some(Location::Bank));
        assert_eq!(b.bank().last(), Some(&PieceId(3)));
        assert_eq!(b.bank().len(), PIECE_COUNT - 1);
    }

    #[test]
    fn moving_between_slots_vacates_the_old_slot() {
        let mut b = board();
        b.place(PieceId(4), 1);
        b.place(PieceId(4), 4);
        assert_eq!(b.occupant(1), None);
        assert_eq!(b.occupant(4), Some(PieceId(4)));
        assert_eq!(b.placed_count(), 1);
    }

    #[test]
    fn status_distinguishes_correct_and_misplaced() {
        let mut b = board();
        b.place(PieceId(2), 2);
        b.place(PieceId(5), 6);
        assert_eq!(b.status(PieceId(2)), PieceStatus::Correct);
        assert_eq!(b.status(PieceId(5)), PieceStatus::Misplaced);
        assert_eq!(b.status(PieceId(0)), PieceStatus::Banked);
    }

    #[test]
    fn solved_only_for_identity_assignment() {
        let mut b = board();
        for i in 0..PIECE_COUNT {
            b.place(PieceId(i), (i + 1) % PIECE_COUNT);
        }
        assert_eq!(b.placed_count(), PIECE_COUNT);
        assert!(!b.is_solved());
        assert!(!b.completion_fired());

        solve(&mut b);
        assert!(b.is_solved());
        assert!(b.completion_fired());
    }

    #[test]
    fn reentering_solved_state_keeps_single_completion() {
        let mut b = board();
        solve(&mut b);
        let fired = b.clone();
        assert!(b.return_to_bank(PieceId(8)));
        assert!(!b.is_solved());
        assert!(b.place(PieceId(8), 8));
        assert!(b.is_solved());
        assert_eq!(b.completion_fired(), fired.completion_fired());
    }

    #[test]
    fn reset_banks_everything_without_completion() {
        let mut b = board();
        b.place(PieceId(0), 0);
        b.place(PieceId(1), 5);
        b.reset();
        assert_eq!(b.placed_count(), 0);
        assert_eq!(b.bank().len(), PIECE_COUNT);
        assert!(!b.completion_fired());
    }

    #[test]
    fn tap_select_then_tap_slot_places() {
        let mut b = board();
        assert!(b.tap_piece(PieceId(6)));
        assert_eq!(b.selected, Some(PieceId(6)));
        assert!(b.tap_slot(6));
        assert_eq!(b.occupant(6), Some(PieceId(6)));
        assert_eq!(b.selected, None);
    }

    #[test]
    fn tap_selected_piece_deselects() {
        let mut b = board();
        b.tap_piece(PieceId(1));
        b.tap_piece(PieceId(1));
        assert_eq!(b.selected, None);
    }

    #[test]
    fn tap_on_placed_piece_with_selection_swaps_it_out() {
        let mut b = board();
        b.place(PieceId(7), 0);
        b.tap_piece(PieceId(0));
        assert!(b.tap_piece(PieceId(7)));
        assert_eq!(b.occupant(0), Some(PieceId(0)));
        assert_eq!(b.location(PieceId(7)), Some(Location::Bank));
    }

    #[test]
    fn tap_on_placed_piece_without_selection_returns_it() {
        let mut b = board();
        b.place(PieceId(2), 3);
        assert!(b.tap_piece(PieceId(2)));
        assert_eq!(b.location(PieceId(2)), Some(Location::Bank));
    }

    #[test]
    fn tap_empty_slot_without_selection_is_noop() {
        let mut b = board();
        assert!(!b.tap_slot(0));
        assert_eq!(b.placed_count(), 0);
    }

    #[test]
    fn drag_and_drop_onto_slot_and_back() {
        let mut b = board();
        assert!(b.begin_drag(PieceId(5)));
        assert!(b.drop_on_slot(5));
        assert_eq!(b.dragging, None);
        assert_eq!(b.status(PieceId(5)), PieceStatus::Correct);

        b.begin_drag(PieceId(5));
        assert!(b.drop_on_bank());
        assert_eq!(b.location(PieceId(5)), Some(Location::Bank));
    }

    #[test]
    fn stale_drop_without_drag_is_ignored() {
        let mut b = board();
        assert!(!b.drop_on_slot(0));
        assert!(!b.drop_on_bank());
        assert_eq!(b.placed_count(), 0);
    }

    #[test]
    fn cancel_drag_leaves_board_untouched() {
        let mut b = board();
        b.place(PieceId(3), 3);
        let before_bank = b.bank().to_vec();
        b.begin_drag(PieceId(3));
        assert!(b.cancel_drag());
        assert_eq!(b.dragging, None);
        assert_eq!(b.occupant(3), Some(PieceId(3)));
        assert_eq!(b.bank(), before_bank.as_slice());
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut b = board();
        assert!(!b.place(PieceId(0), PIECE_COUNT));
    }

    #[test]
    fn image_path_uses_one_based_row_and_col() {
        assert_eq!(PieceId(0).image_path("cocopic"), "cocopic/piece_1_1.png");
        assert_eq!(PieceId(5).image_path("cocopic"), "cocopic/piece_2_3.png");
    }

    #[test]
    fn reducer_reset_after_solve_does_not_clear_latch() {
        let mut b = board();
        solve(&mut b);
        let b = Rc::new(b).reduce(PuzzleAction::Reset);
        assert_eq!(b.placed_count(), 0);
        assert!(b.completion_fired());
    }
}
