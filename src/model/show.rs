//! Act/scene orchestration state machine.
//!
//! Visibility and layout are projections of [`ShowState::stage`]; nothing in
//! the rendered markup is read back as state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Act {
    Opening,
    Playful,
    Question,
    Finale,
}

impl Act {
    pub const ALL: [Act; 4] = [Act::Opening, Act::Playful, Act::Question, Act::Finale];

    pub fn dom_id(self) -> &'static str {
        match self {
            Act::Opening => "act-1",
            Act::Playful => "act-2",
            Act::Question => "act-3",
            Act::Finale => "act-4",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    Puzzle,
    Match,
    Catch,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Puzzle, Scene::Match, Scene::Catch];

    pub fn index(self) -> usize {
        match self {
            Scene::Puzzle => 0,
            Scene::Match => 1,
            Scene::Catch => 2,
        }
    }

    pub fn next(self) -> Option<Scene> {
        match self {
            Scene::Puzzle => Some(Scene::Match),
            Scene::Match => Some(Scene::Catch),
            Scene::Catch => None,
        }
    }

    pub fn dom_id(self) -> &'static str {
        match self {
            Scene::Puzzle => "scene-1",
            Scene::Match => "scene-2",
            Scene::Catch => "scene-3",
        }
    }
}

/// Where the show currently is. `Finale` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Opening,
    Playful(Scene),
    Question,
    Finale,
}

impl Stage {
    pub fn act(self) -> Act {
        match self {
            Stage::Opening => Act::Opening,
            Stage::Playful(_) => Act::Playful,
            Stage::Question => Act::Question,
            Stage::Finale => Act::Finale,
        }
    }

    pub fn scene(self) -> Option<Scene> {
        match self {
            Stage::Playful(scene) => Some(scene),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Playful(scene) => write!(f, "{}/{}", Act::Playful.dom_id(), scene.dom_id()),
            other => f.write_str(other.act().dom_id()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    Centered,
    Scrollable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowState {
    pub stage: Stage,
    /// Completion flags, indexed by [`Scene::index`].
    pub completed: [bool; 3],
    pub curtain_open: bool,
    /// Set once Act II has been entered; mini-games are mounted from then on.
    pub games_started: bool,
    /// Set once Act III has been entered; the gate is mounted from then on.
    pub gate_started: bool,
    /// Bumped on every `show_act`; the layout effect keys on it.
    pub layout_epoch: u32,
}

impl Default for ShowState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShowAction {
    OpenCurtain,
    /// Curtain signal plus the settle delay have elapsed.
    EnterPlayful,
    SceneComplete(Scene),
    Proceed(Scene),
    GateFinished,
}

impl ShowState {
    pub fn new() -> Self {
        Self {
            stage: Stage::Opening,
            completed: [false; 3],
            curtain_open: false,
            games_started: false,
            gate_started: false,
            layout_epoch: 0,
        }
    }

    /// Applies `action`; returns `false` and leaves the state untouched when
    /// the current stage does not accept it.
    pub fn step(&mut self, action: &ShowAction) -> bool {
        match (action, self.stage) {
            (ShowAction::OpenCurtain, _) => {
                if self.curtain_open {
                    return false;
                }
                self.curtain_open = true;
                true
            }
            (ShowAction::EnterPlayful, Stage::Opening) => {
                self.games_started = true;
                self.show_act(Stage::Playful(Scene::Puzzle));
                true
            }
            (ShowAction::SceneComplete(scene), _) => {
                let flag = &mut self.completed[scene.index()];
                if !self.games_started || *flag {
                    return false;
                }
                *flag = true;
                true
            }
            (ShowAction::Proceed(scene), Stage::Playful(current)) => {
                if *scene != current || !self.proceed_enabled(current) {
                    return false;
                }
                match current.next() {
                    Some(next) => self.show_act(Stage::Playful(next)),
                    None => {
                        self.gate_started = true;
                        self.show_act(Stage::Question);
                    }
                }
                true
            }
            (ShowAction::GateFinished, Stage::Question) => {
                self.show_act(Stage::Finale);
                true
            }
            _ => false,
        }
    }

    fn show_act(&mut self, target: Stage) {
        self.stage = target;
        self.layout_epoch = self.layout_epoch.wrapping_add(1);
    }

    pub fn act_visible(&self, act: Act) -> bool {
        self.stage.act() == act
    }

    pub fn scene_visible(&self, scene: Scene) -> bool {
        self.stage.scene() == Some(scene)
    }

    pub fn proceed_enabled(&self, scene: Scene) -> bool {
        self.completed[scene.index()]
    }

    /// Page-level layout: the opening and finale sit centred in a fixed
    /// viewport, the middle acts scroll.
    pub fn body_layout(&self) -> LayoutMode {
        match self.stage {
            Stage::Opening | Stage::Finale => LayoutMode::Centered,
            Stage::Playful(_) | Stage::Question => LayoutMode::Scrollable,
        }
    }

    /// Whether `act` gets the vertical flex-centering override. Only the
    /// visible act can carry it, so leaving an act drops its override.
    pub fn centers_act(&self, act: Act) -> bool {
        match (act, self.stage) {
            (Act::Finale, Stage::Finale) => true,
            (Act::Playful, Stage::Playful(Scene::Match | Scene::Catch)) => true,
            _ => false,
        }
    }
}

impl Reducible for ShowState {
    type Action = ShowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if !new.step(&action) {
            return self;
        }
        Rc::new(new)
    }
}
