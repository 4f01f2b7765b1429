//! Catch-the-props game: a spawn loop drops items that fall on their own
//! tick and are caught when they overlap the pointer-driven basket.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use super::completion::CompletionLatch;
use crate::config::CatchRules;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Item box has reached the basket's top edge and overlaps it horizontally.
pub fn touches_basket(item: &Rect, basket: &Rect) -> bool {
    item.bottom() >= basket.top && item.left < basket.right() && item.right() > basket.left
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    /// Index into the configured prop kinds.
    pub kind: usize,
    pub left: f64,
    pub top: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtItem {
    pub id: u32,
    pub kind: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Every item has been spawned.
    Exhausted,
    /// The catch goal was reached.
    Threshold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnOutcome {
    Idle,
    Spawned(u32),
    Exhausted { completed: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallOutcome {
    /// The item was already removed; its tick should stop.
    Gone,
    Falling,
    Caught { completed: bool },
    Missed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatchGame {
    rules: CatchRules,
    kinds: usize,
    width: f64,
    height: f64,
    basket_center: f64,
    started: bool,
    spawning: bool,
    spawned: u32,
    next_id: u32,
    falling: Vec<FallingItem>,
    caught: Vec<CaughtItem>,
    completion: Option<FinishReason>,
    latch: CompletionLatch,
}

impl CatchGame {
    pub fn new(rules: CatchRules, kinds: usize) -> Self {
        Self {
            rules,
            kinds: kinds.max(1),
            width: 0.0,
            height: 0.0,
            basket_center: 0.0,
            started: false,
            spawning: false,
            spawned: 0,
            next_id: 0,
            falling: Vec::new(),
            caught: Vec::new(),
            completion: None,
            latch: CompletionLatch::default(),
        }
    }

    pub fn rules(&self) -> &CatchRules {
        &self.rules
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn spawning(&self) -> bool {
        self.spawning
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn falling(&self) -> &[FallingItem] {
        &self.falling
    }

    pub fn caught(&self) -> &[CaughtItem] {
        &self.caught
    }

    /// Why completion fired, if it has.
    pub fn completion(&self) -> Option<FinishReason> {
        self.completion
    }

    pub fn is_finished(&self) -> bool {
        self.started && !self.spawning
    }

    /// Records the play-area size; the basket is recentred the first time.
    pub fn set_area(&mut self, width: f64, height: f64) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        let first = self.width <= 0.0;
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        if first {
            self.basket_center = self.width / 2.0;
        }
        self.basket_center = self.clamp_basket(self.basket_center);
        true
    }

    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.spawning = true;
        true
    }

    pub fn move_basket(&mut self, pointer_x: f64) -> bool {
        let x = self.clamp_basket(pointer_x);
        if x == self.basket_center {
            return false;
        }
        self.basket_center = x;
        true
    }

    fn clamp_basket(&self, x: f64) -> f64 {
        let edge = self.rules.basket_edge;
        if self.width <= edge * 2.0 {
            return self.width / 2.0;
        }
        x.clamp(edge, self.width - edge)
    }

    pub fn basket_center(&self) -> f64 {
        self.basket_center
    }

    pub fn basket_rect(&self) -> Rect {
        Rect {
            left: self.basket_center - self.rules.basket_width / 2.0,
            top: self.height - self.rules.basket_height,
            width: self.rules.basket_width,
            height: self.rules.basket_height,
        }
    }

    pub fn item_rect(&self, item: &FallingItem) -> Rect {
        Rect {
            left: item.left,
            top: item.top,
            width: self.rules.item_size,
            height: self.rules.item_size,
        }
    }

    /// One beat of the spawn loop. The beat after the last spawn ends the
    /// loop.
    pub fn spawn_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpawnOutcome {
        if !self.spawning {
            return SpawnOutcome::Idle;
        }
        if self.spawned >= self.rules.max_spawn {
            self.spawning = false;
            let completed = self.complete(FinishReason::Exhausted);
            return SpawnOutcome::Exhausted { completed };
        }
        let span = (self.rules.spawn_max_frac - self.rules.spawn_min_frac).max(0.0);
        let frac = self.rules.spawn_min_frac + rng.gen_range(0.0..1.0) * span;
        let id = self.next_id;
        self.next_id += 1;
        self.falling.push(FallingItem {
            id,
            kind: rng.gen_range(0..self.kinds),
            left: self.width * frac,
            top: self.rules.spawn_top,
        });
        self.spawned += 1;
        SpawnOutcome::Spawned(id)
    }

    /// One beat of an item's fall.
    pub fn fall_tick<R: Rng + ?Sized>(&mut self, id: u32, rng: &mut R) -> FallOutcome {
        let Some(pos) = self.falling.iter().position(|f| f.id == id) else {
            return FallOutcome::Gone;
        };
        let jitter = if self.rules.fall_jitter > 0.0 {
            rng.gen_range(0.0..self.rules.fall_jitter)
        } else {
            0.0
        };
        self.falling[pos].top += self.rules.fall_step + jitter;
        let item = self.falling[pos];
        if touches_basket(&self.item_rect(&item), &self.basket_rect()) {
            self.falling.remove(pos);
            self.caught.push(CaughtItem {
                id: item.id,
                kind: item.kind,
            });
            let mut completed = false;
            if self.caught.len() as u32 >= self.rules.catch_goal {
                self.spawning = false;
                completed = self.complete(FinishReason::Threshold);
            }
            return FallOutcome::Caught { completed };
        }
        if item.top > self.height + self.rules.miss_margin {
            self.falling.remove(pos);
            return FallOutcome::Missed;
        }
        FallOutcome::Falling
    }

    fn complete(&mut self, reason: FinishReason) -> bool {
        if !self.latch.fire() {
            return false;
        }
        self.completion = Some(reason);
        true
    }
}

/// Converts a viewport x into play-area coordinates. `box_left` is the
/// element's border-box edge and `border_left` its left border width, since
/// items and the basket are positioned inside the padding box.
pub fn area_x(client_x: f64, box_left: f64, border_left: f64) -> f64 {
    client_x - box_left - border_left
}

/// Picks one message at random; `None` only for an empty list.
pub fn pick_message<'a, R: Rng + ?Sized>(rng: &mut R, messages: &'a [String]) -> Option<&'a str> {
    messages.choose(rng).map(String::as_str)
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatchAction {
    Measure { width: f64, height: f64 },
    Start,
    SpawnTick,
    FallTick(u32),
    MoveBasket(f64),
}

impl Reducible for CatchGame {
    type Action = CatchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let mut rng = rand::thread_rng();
        let changed = match action {
            CatchAction::Measure { width, height } => new.set_area(width, height),
            CatchAction::Start => new.start(),
            CatchAction::SpawnTick => new.spawn_tick(&mut rng) != SpawnOutcome::Idle,
            CatchAction::FallTick(id) => new.fall_tick(id, &mut rng) != FallOutcome::Gone,
            CatchAction::MoveBasket(x) => new.move_basket(x),
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

    fn game() -> CatchGame {
        let mut g = CatchGame::new(CatchRules::default(), 1);
        g.set_area(400.0, 300.0);
        g
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    /// Ticks item `id` until it leaves play.
    fn drop_item(g: &mut CatchGame, id: u32, rng: &mut StdRng) -> FallOutcome {
        loop {
            match g.fall_tick(id, rng) {
                FallOutcome::Falling => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn nothing_spawns_before_start() {
        let mut g = game();
        assert_eq!(g.spawn_tick(&mut rng()), SpawnOutcome::Idle);
        assert!(g.start());
        assert!(!g.start());
        assert!(matches!(g.spawn_tick(&mut rng()), SpawnOutcome::Spawned(0)));
    }

    #[test]
    fn spawn_positions_stay_within_band() {
        let mut g = game();
        let mut r = rng();
        g.start();
        for _ in 0..9 {
            g.spawn_tick(&mut r);
        }
        for item in g.falling() {
            assert!(item.left >= 40.0 && item.left <= 360.0, "left {}", item.left);
            assert_eq!(item.top, -40.0);
        }
    }

    #[test]
    fn spawn_count_never_exceeds_max() {
        let mut g = game();
        let mut r = rng();
        assert!(!g.is_finished());
        g.start();
        assert!(!g.is_finished());
        let mut outcomes = Vec::new();
        for _ in 0..20 {
            outcomes.push(g.spawn_tick(&mut r));
        }
        assert_eq!(g.spawned(), 9);
        assert_eq!(outcomes[9], SpawnOutcome::Exhausted { completed: true });
        assert!(outcomes[10..].iter().all(|o| *o == SpawnOutcome::Idle));
        assert_eq!(g.completion(), Some(FinishReason::Exhausted));
        assert!(g.is_finished());
    }

    #[test]
    fn pointer_maps_into_padding_box() {
        assert_eq!(area_x(101.0, 100.0, 1.0), 0.0);
        let mut g = game();
        assert!(g.move_basket(area_x(351.0, 100.0, 1.0)));
        assert_eq!(g.basket_center(), 250.0);
        // beyond the far border the basket stays clamped inside the area
        g.move_basket(area_x(502.0, 100.0, 1.0));
        assert_eq!(g.basket_center(), 360.0);
    }

    #[test]
    fn item_under_basket_is_caught() {
        let mut g = game();
        let mut r = rng();
        g.start();
        let SpawnOutcome::Spawned(id) = g.spawn_tick(&mut r) else {
            panic!("expected a spawn");
        };
        let left = g.falling()[0].left;
        g.move_basket(left + 20.0);
        assert_eq!(drop_item(&mut g, id, &mut r), FallOutcome::Caught { completed: false });
        assert_eq!(g.caught().len(), 1);
        assert!(g.falling().is_empty());
        assert_eq!(g.fall_tick(id, &mut r), FallOutcome::Gone);
    }

    #[test]
    fn item_away_from_basket_is_missed() {
        let mut g = game();
        let mut r = rng();
        g.start();
        g.spawn_tick(&mut r);
        let left = g.falling()[0].left;
        let far = if left < 200.0 { 400.0 } else { 0.0 };
        g.move_basket(far);
        let rect = g.basket_rect();
        assert!(rect.left >= left + 40.0 || rect.right() <= left);
        assert_eq!(drop_item(&mut g, 0, &mut r), FallOutcome::Missed);
        assert!(g.caught().is_empty());
    }

    #[test]
    fn caught_only_once_box_reaches_basket_top() {
        let g = game();
        let basket = g.basket_rect();
        let above = Rect { left: basket.left + 10.0, top: basket.top - 41.0, width: 40.0, height: 40.0 };
        let touching = Rect { top: basket.top - 40.0, ..above };
        assert!(!touches_basket(&above, &basket));
        assert!(touches_basket(&touching, &basket));
        let beside = Rect { left: basket.right(), ..touching };
        assert!(!touches_basket(&beside, &basket));
    }

    #[test]
    fn basket_is_clamped_to_area() {
        let mut g = game();
        g.move_basket(-50.0);
        assert_eq!(g.basket_center(), 40.0);
        g.move_basket(1000.0);
        assert_eq!(g.basket_center(), 360.0);
    }

    #[test]
    fn threshold_completion_fires_once_even_with_exhaustion() {
        let mut rules = CatchRules::default();
        rules.catch_goal = 2;
        rules.max_spawn = 2;
        let mut g = CatchGame::new(rules, 1);
        g.set_area(400.0, 300.0);
        let mut r = rng();
        g.start();
        g.spawn_tick(&mut r);
        g.spawn_tick(&mut r);
        let ids: Vec<(u32, f64)> = g.falling().iter().map(|f| (f.id, f.left)).collect();

        g.move_basket(ids[0].1 + 20.0);
        assert_eq!(drop_item(&mut g, ids[0].0, &mut r), FallOutcome::Caught { completed: false });
        g.move_basket(ids[1].1 + 20.0);
        assert_eq!(drop_item(&mut g, ids[1].0, &mut r), FallOutcome::Caught { completed: true });
        assert_eq!(g.completion(), Some(FinishReason::Threshold));
        assert!(!g.spawning());
        assert_eq!(g.spawn_tick(&mut r), SpawnOutcome::Idle);
    }

    #[test]
    fn exhaustion_then_late_catch_does_not_refire() {
        let mut rules = CatchRules::default();
        rules.catch_goal = 1;
        rules.max_spawn = 1;
        let mut g = CatchGame::new(rules, 1);
        g.set_area(400.0, 300.0);
        let mut r = rng();
        g.start();
        g.spawn_tick(&mut r);
        assert_eq!(g.spawn_tick(&mut r), SpawnOutcome::Exhausted { completed: true });
        let left = g.falling()[0].left;
        g.move_basket(left + 20.0);
        assert_eq!(drop_item(&mut g, 0, &mut r), FallOutcome::Caught { completed: false });
        assert_eq!(g.completion(), Some(FinishReason::Exhausted));
    }

    #[test]
    fn pick_message_draws_from_list() {
        let messages = vec!["a".to_string(), "b".to_string()];
        let mut r = rng();
        for _ in 0..10 {
            let m = pick_message(&mut r, &messages).unwrap();
            assert!(m == "a" || m == "b");
        }
        assert_eq!(pick_message(&mut r, &[]), None);
    }
}
