//! Fixed show configuration: timings, game rules, content paths and the
//! fallback content used when a fetch fails.

use serde::{Deserialize, Serialize};

/// The Act III unlock code.
pub const PIN_CODE: &str = "26201";
pub const PIN_LENGTH: usize = 5;

pub const LETTER_PATH: &str = "./data/letter.txt";
pub const COMPLIMENTS_PATH: &str = "./data/compliments.json";

pub const DEFAULT_LETTER: &str = "Some things are easier to write than to say out loud.\n\n\
Thank you for every scene we've shared so far. The laughter, the quiet \
moments, the chaos backstage. I wanted to make something that felt like \
us, so I built a little play.\n\nThere's one more act left.";

pub const DEFAULT_COMPLIMENTS: [&str; 5] = [
    "You're cuter than your dog. Yes, I said it.",
    "Your laugh should win Best Soundtrack Award.",
    "I still smile when I think about that time we... (customize me!)",
    "You light up a room brighter than any spotlight.",
    "You make every scene more fun.",
];

pub const YES_MESSAGE: &str = "AMAZING LETSGOOOOOOOOOOOOOOOOOO!!🌟";
pub const NO_MESSAGE: &str = "It slipped away... try the other button ♥";

/// Every fixed delay in the show, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub title_fade_ms: u32,
    pub subtitle_fade_ms: u32,
    pub curtain_shake_ms: u32,
    pub curtain_open_ms: u32,
    pub curtain_signal_ms: u32,
    /// Wait after the curtain signal before Act II appears.
    pub act2_delay_ms: u32,
    pub puzzle_celebrate_ms: u32,
    pub match_celebrate_ms: u32,
    pub mismatch_revert_ms: u32,
    pub catch_spawn_ms: u32,
    pub catch_fall_ms: u32,
    pub catch_exhausted_ms: u32,
    pub catch_threshold_ms: u32,
    pub compliment_toast_ms: u32,
    pub sparkle_life_ms: u32,
    pub confetti_life_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            title_fade_ms: 400,
            subtitle_fade_ms: 900,
            curtain_shake_ms: 200,
            curtain_open_ms: 250,
            curtain_signal_ms: 500,
            act2_delay_ms: 900,
            puzzle_celebrate_ms: 600,
            match_celebrate_ms: 400,
            mismatch_revert_ms: 600,
            catch_spawn_ms: 650,
            catch_fall_ms: 60,
            catch_exhausted_ms: 1000,
            catch_threshold_ms: 600,
            compliment_toast_ms: 1800,
            sparkle_life_ms: 1000,
            confetti_life_ms: 2200,
        }
    }
}

/// Geometry and quotas for the catch game. Lengths are CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatchRules {
    pub max_spawn: u32,
    pub catch_goal: u32,
    pub item_size: f64,
    pub spawn_top: f64,
    pub fall_step: f64,
    pub fall_jitter: f64,
    /// Items are removed once their top passes `area height + miss_margin`.
    pub miss_margin: f64,
    pub basket_width: f64,
    pub basket_height: f64,
    /// Distance the basket centre keeps from either edge of the area.
    pub basket_edge: f64,
    /// Spawn column range as a fraction of the area width.
    pub spawn_min_frac: f64,
    pub spawn_max_frac: f64,
}

impl Default for CatchRules {
    fn default() -> Self {
        Self {
            max_spawn: 9,
            catch_goal: 9,
            item_size: 40.0,
            spawn_top: -40.0,
            fall_step: 6.0,
            fall_jitter: 4.0,
            miss_margin: 60.0,
            basket_width: 120.0,
            basket_height: 60.0,
            basket_edge: 40.0,
            spawn_min_frac: 0.10,
            spawn_max_frac: 0.90,
        }
    }
}

/// A falling prop type. `image` is resolved relative to the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropKind {
    pub image: String,
    pub name: String,
}

pub fn default_props() -> Vec<PropKind> {
    vec![PropKind {
        image: "greengrape.png".into(),
        name: "Green Grape".into(),
    }]
}

/// Folder holding `piece_{row}_{col}.png` for the 3x3 puzzle.
pub const PUZZLE_PIECE_FOLDER: &str = "cocopic";

pub fn default_compliments() -> Vec<String> {
    DEFAULT_COMPLIMENTS.iter().map(|s| s.to_string()).collect()
}
