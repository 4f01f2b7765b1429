//! Core state for the show: the act orchestrator and each module it drives.
//! Everything here is plain Rust so it runs under host `cargo test`.

pub mod catch;
pub mod completion;
pub mod curtain;
pub mod effects;
pub mod finale;
pub mod gate;
pub mod matching;
pub mod puzzle;
pub mod show;

pub use catch::{CatchAction, CatchGame, FinishReason};
pub use completion::CompletionLatch;
pub use curtain::{Curtain, CurtainCue, CurtainPhase};
pub use finale::Finale;
pub use gate::{GateAction, GateFeedback, GatePhase, PinGate};
pub use matching::{MatchAction, MatchBoard};
pub use puzzle::{PieceId, PieceStatus, PuzzleAction, PuzzleBoard};
pub use show::{Act, LayoutMode, Scene, ShowAction, ShowState, Stage};
