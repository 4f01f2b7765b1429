// Touch drag state for the puzzle: the dragged piece follows the finger.
use crate::model::PieceId;

/// Movement, in px, below which a touch counts as a tap.
pub const TAP_SLOP: f64 = 8.0;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct TouchDrag {
    pub piece: Option<PieceId>,
    pub start_x: f64,
    pub start_y: f64,
    pub last_x: f64,
    pub last_y: f64,
    pub moved: bool,
}

/// How a finished touch should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchRelease {
    Tap(PieceId),
    Drop { piece: PieceId, x: f64, y: f64 },
}

impl TouchDrag {
    pub fn begin(&mut self, piece: PieceId, x: f64, y: f64) {
        *self = Self {
            piece: Some(piece),
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            moved: false,
        };
    }

    pub fn update(&mut self, x: f64, y: f64) {
        if self.piece.is_none() {
            return;
        }
        self.last_x = x;
        self.last_y = y;
        if (x - self.start_x).hypot(y - self.start_y) > TAP_SLOP {
            self.moved = true;
        }
    }

    /// Translation to apply to the dragged piece.
    pub fn offset(&self) -> (f64, f64) {
        (self.last_x - self.start_x, self.last_y - self.start_y)
    }

    pub fn release(&mut self) -> Option<TouchRelease> {
        let piece = self.piece.take()?;
        let release = if self.moved {
            TouchRelease::Drop {
                piece,
                x: self.last_x,
                y: self.last_y,
            }
        } else {
            TouchRelease::Tap(piece)
        };
        *self = Self::default();
        Some(release)
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_movement_is_a_tap() {
        let mut t = TouchDrag::default();
        t.begin(PieceId(2), 10.0, 10.0);
        t.update(13.0, 12.0);
        assert_eq!(t.release(), Some(TouchRelease::Tap(PieceId(2))));
        assert_eq!(t.release(), None);
    }

    #[test]
    fn long_movement_is_a_drop_at_last_point() {
        let mut t = TouchDrag::default();
        t.begin(PieceId(4), 0.0, 0.0);
        t.update(50.0, 20.0);
        assert_eq!(t.offset(), (50.0, 20.0));
        assert_eq!(
            t.release(),
            Some(TouchRelease::Drop { piece: PieceId(4), x: 50.0, y: 20.0 })
        );
    }

    #[test]
    fn cancel_clears_state() {
        let mut t = TouchDrag::default();
        t.begin(PieceId(1), 0.0, 0.0);
        t.update(40.0, 0.0);
        t.cancel();
        assert_eq!(t, TouchDrag::default());
        assert_eq!(t.offset(), (0.0, 0.0));
    }
}
