use rand::Rng;
use serde::{Deserialize, Serialize};

/// Horizontal range, in px, the "no" button may dodge to either side.
pub const DODGE_RANGE: f64 = 70.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Finale {
    answered: bool,
    no_offset: f64,
}

impl Finale {
    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn no_offset(&self) -> f64 {
        self.no_offset
    }

    /// The "yes" answer; only the first one counts.
    pub fn accept(&mut self) -> bool {
        if self.answered {
            return false;
        }
        self.answered = true;
        true
    }

    /// Moves the "no" button somewhere else along the row.
    pub fn dodge<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.answered {
            return false;
        }
        self.no_offset = rng.gen_range(-DODGE_RANGE..DODGE_RANGE);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn accept_only_once() {
        let mut f = Finale::default();
        assert!(f.accept());
        assert!(!f.accept());
        assert!(f.answered());
    }

    #[test]
    fn dodge_stays_in_range_and_stops_after_answer() {
        let mut f = Finale::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert!(f.dodge(&mut rng));
            assert!(f.no_offset().abs() <= DODGE_RANGE);
        }
        f.accept();
        let offset = f.no_offset();
        assert!(!f.dodge(&mut rng));
        assert_eq!(f.no_offset(), offset);
    }
}
