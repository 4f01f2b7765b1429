use serde::{Deserialize, Serialize};

use crate::config::Timings;

/// Progress of the one-shot Act I curtain sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurtainPhase {
    Waiting,
    Shaking,
    Opening,
    Signalled,
}

/// A timed step of the sequence, offset from the start action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurtainCue {
    EndShake { at_ms: u32 },
    Open { at_ms: u32 },
    Signal { at_ms: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curtain {
    phase: CurtainPhase,
    shaking: bool,
}

impl Default for Curtain {
    fn default() -> Self {
        Self {
            phase: CurtainPhase::Waiting,
            shaking: false,
        }
    }
}

impl Curtain {
    pub fn phase(&self) -> CurtainPhase {
        self.phase
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// The start control stays interactive only before the first start.
    pub fn button_enabled(&self) -> bool {
        self.phase == CurtainPhase::Waiting
    }

    /// Begins the sequence and returns the cues to schedule, or `None` when
    /// it has already begun.
    pub fn start(&mut self, timings: &Timings) -> Option<[CurtainCue; 3]> {
        if self.phase != CurtainPhase::Waiting {
            return None;
        }
        self.phase = CurtainPhase::Shaking;
        self.shaking = true;
        Some([
            CurtainCue::EndShake { at_ms: timings.curtain_shake_ms },
            CurtainCue::Open { at_ms: timings.curtain_open_ms },
            CurtainCue::Signal { at_ms: timings.curtain_signal_ms },
        ])
    }

    /// Applies a cue. Returns `true` only for the cue that should fire the
    /// start signal.
    pub fn apply(&mut self, cue: CurtainCue) -> bool {
        match cue {
            CurtainCue::EndShake { .. } => {
                self.shaking = false;
                false
            }
            CurtainCue::Open { .. } => {
                if self.phase == CurtainPhase::Shaking {
                    self.phase = CurtainPhase::Opening;
                }
                false
            }
            CurtainCue::Signal { .. } => {
                if self.phase == CurtainPhase::Waiting || self.phase == CurtainPhase::Signalled {
                    return false;
                }
                self.phase = CurtainPhase::Signalled;
                true
            }
        }
    }
}

impl CurtainCue {
    pub fn at_ms(self) -> u32 {
        match self {
            CurtainCue::EndShake { at_ms } | CurtainCue::Open { at_ms } | CurtainCue::Signal { at_ms } => at_ms,
        }
    }
}
