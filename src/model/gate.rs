//! PIN-locked letter reveal for Act III.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::{PIN_CODE, PIN_LENGTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatePhase {
    Locked,
    Unlocked,
    Finished,
}

/// Inline message shown under the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateFeedback {
    Incomplete,
    Incorrect,
}

impl GateFeedback {
    pub fn message(self) -> &'static str {
        match self {
            GateFeedback::Incomplete => "Please enter all 5 digits.",
            GateFeedback::Incorrect => "That's not it. Try again!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Ignored,
    Incomplete,
    Incorrect,
    Unlocked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinGate {
    code: String,
    buffer: String,
    phase: GatePhase,
    feedback: Option<GateFeedback>,
    /// The gate was left through skip rather than the letter.
    skipped: bool,
}

impl Default for PinGate {
    fn default() -> Self {
        Self::new(PIN_CODE)
    }
}

impl PinGate {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            buffer: String::new(),
            phase: GatePhase::Locked,
            feedback: None,
            skipped: false,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn feedback(&self) -> Option<GateFeedback> {
        self.feedback
    }

    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Filled/empty dots for the entry display.
    pub fn mask(&self) -> String {
        let filled = self.buffer.chars().count().min(PIN_LENGTH);
        "●".repeat(filled) + &"○".repeat(PIN_LENGTH - filled)
    }

    pub fn press_digit(&mut self, digit: char) -> bool {
        if self.phase != GatePhase::Locked
            || !digit.is_ascii_digit()
            || self.buffer.len() >= PIN_LENGTH
        {
            return false;
        }
        self.buffer.push(digit);
        self.feedback = None;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.phase != GatePhase::Locked || (self.buffer.is_empty() && self.feedback.is_none()) {
            return false;
        }
        self.buffer.clear();
        self.feedback = None;
        true
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.phase != GatePhase::Locked {
            return SubmitOutcome::Ignored;
        }
        if self.buffer.len() < PIN_LENGTH {
            self.feedback = Some(GateFeedback::Incomplete);
            return SubmitOutcome::Incomplete;
        }
        if self.buffer != self.code {
            self.buffer.clear();
            self.feedback = Some(GateFeedback::Incorrect);
            return SubmitOutcome::Incorrect;
        }
        self.buffer.clear();
        self.feedback = None;
        self.phase = GatePhase::Unlocked;
        SubmitOutcome::Unlocked
    }

    /// Leaves the gate without unlocking. Allowed only while locked.
    pub fn skip(&mut self) -> bool {
        if self.phase != GatePhase::Locked {
            return false;
        }
        self.skipped = true;
        self.phase = GatePhase::Finished;
        true
    }

    /// Acknowledges the revealed letter.
    pub fn finish(&mut self) -> bool {
        if self.phase != GatePhase::Unlocked {
            return false;
        }
        self.phase = GatePhase::Finished;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GateAction {
    Digit(char),
    Clear,
    Submit,
    Skip,
    Finish,
}

impl Reducible for PinGate {
    type Action = GateAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let changed = match action {
            GateAction::Digit(d) => new.press_digit(d),
            GateAction::Clear => new.clear(),
            GateAction::Submit => new.submit() != SubmitOutcome::Ignored,
            GateAction::Skip => new.skip(),
            GateAction::Finish => new.finish(),
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

    fn enter(gate: &mut PinGate, digits: &str) {
        for d in digits.chars() {
            gate.press_digit(d);
        }
    }

    #[test]
    fn correct_code_unlocks() {
        let mut g = PinGate::default();
        enter(&mut g, "26201");
        assert_eq!(g.submit(), SubmitOutcome::Unlocked);
        assert_eq!(g.phase(), GatePhase::Unlocked);
        assert_eq!(g.feedback(), None);
    }

    #[test]
    fn wrong_code_resets_buffer_with_error() {
        let mut g = PinGate::default();
        enter(&mut g, "12345");
        assert_eq!(g.submit(), SubmitOutcome::Incorrect);
        assert_eq!(g.buffer(), "");
        assert_eq!(g.feedback(), Some(GateFeedback::Incorrect));
        assert_eq!(g.phase(), GatePhase::Locked);
    }

    #[test]
    fn short_entry_keeps_buffer() {
        let mut g = PinGate::default();
        enter(&mut g, "262");
        assert_eq!(g.submit(), SubmitOutcome::Incomplete);
        assert_eq!(g.buffer(), "262");
        assert_eq!(g.feedback(), Some(GateFeedback::Incomplete));
        assert_ne!(GateFeedback::Incomplete.message(), GateFeedback::Incorrect.message());
    }

    #[test]
    fn buffer_is_bounded_to_five_digits() {
        let mut g = PinGate::default();
        enter(&mut g, "2620199");
        assert_eq!(g.buffer(), "26201");
        assert!(!g.press_digit('x'));
        assert_eq!(g.mask(), "●●●●●");
    }

    #[test]
    fn typing_after_error_clears_feedback() {
        let mut g = PinGate::default();
        g.submit();
        assert!(g.feedback().is_some());
        g.press_digit('1');
        assert_eq!(g.feedback(), None);
        assert_eq!(g.mask(), "●○○○○");
    }

    #[test]
    fn clear_empties_buffer() {
        let mut g = PinGate::default();
        enter(&mut g, "26");
        assert!(g.clear());
        assert_eq!(g.buffer(), "");
        assert!(!g.clear());
    }

    #[test]
    fn skip_finishes_without_unlocking() {
        let mut g = PinGate::default();
        enter(&mut g, "1");
        assert!(g.skip());
        assert_eq!(g.phase(), GatePhase::Finished);
        assert!(g.skipped());
        assert!(!g.finish());
        assert!(!g.skip());
    }

    #[test]
    fn finish_requires_unlock() {
        let mut g = PinGate::default();
        assert!(!g.finish());
        enter(&mut g, "26201");
        g.submit();
        assert!(!g.press_digit('1'));
        assert!(g.finish());
        assert_eq!(g.phase(), GatePhase::Finished);
        assert!(!g.finish());
        assert_eq!(g.submit(), SubmitOutcome::Ignored);
    }
}
