use gloo::timers::callback::{Interval, Timeout};
use std::rc::Rc;
use web_sys::{Element, TouchEvent};
use yew::prelude::*;

use crate::config::{CatchRules, PropKind, Timings, default_compliments};
use crate::model::catch::{area_x, pick_message};
use crate::model::{CatchAction, CatchGame, FinishReason};
use crate::state::TickSet;
use crate::util::{anchor_or_log, clog};

#[derive(Properties, PartialEq, Clone)]
pub struct CatchSceneProps {
    pub timings: Timings,
    #[prop_or_default]
    pub rules: CatchRules,
    pub prop_kinds: Rc<Vec<PropKind>>,
    /// Loaded compliments; `None` while loading.
    #[prop_or_default]
    pub compliments: Option<Rc<Vec<String>>>,
    pub on_complete: Callback<()>,
}

/// Measures the play area and converts a viewport x into area coordinates.
fn measure(area: &NodeRef, game: &UseReducerHandle<CatchGame>, client_x: Option<f64>) {
    let Some(el) = anchor_or_log::<Element>(area, "catch-area", "catch") else {
        return;
    };
    game.dispatch(CatchAction::Measure {
        width: el.client_width() as f64,
        height: el.client_height() as f64,
    });
    if let Some(x) = client_x {
        let left = el.get_bounding_client_rect().left();
        game.dispatch(CatchAction::MoveBasket(area_x(x, left, el.client_left() as f64)));
    }
}

#[function_component(CatchScene)]
pub fn catch_scene(props: &CatchSceneProps) -> Html {
    let kinds = props.prop_kinds.len();
    let rules = props.rules;
    let game = use_reducer(move || CatchGame::new(rules, kinds));
    let area = use_node_ref();
    let fall_timers = use_mut_ref(TickSet::<u32, Interval>::default);
    let toast = use_state(|| None::<String>);
    let toast_timer = use_mut_ref(|| None::<Timeout>);

    // Spawn loop
    {
        let game_h = game.clone();
        let every = props.timings.catch_spawn_ms;
        use_effect_with(game.spawning(), move |spawning| {
            let handle = spawning.then(|| {
                clog("catch: spawning");
                Interval::new(every, move || game_h.dispatch(CatchAction::SpawnTick))
            });
            move || drop(handle)
        });
    }

    // One fall interval per live item
    {
        let game_h = game.clone();
        let fall_timers = fall_timers.clone();
        let every = props.timings.catch_fall_ms;
        let live: Vec<u32> = game.falling().iter().map(|f| f.id).collect();
        use_effect_with(live, move |live| {
            fall_timers.borrow_mut().sync(live, |id| {
                let game_h = game_h.clone();
                Interval::new(every, move || game_h.dispatch(CatchAction::FallTick(id)))
            });
            || ()
        });
    }
    {
        let fall_timers = fall_timers.clone();
        let toast_timer = toast_timer.clone();
        use_effect_with((), move |_| {
            move || {
                fall_timers.borrow_mut().clear();
                toast_timer.borrow_mut().take();
            }
        });
    }

    {
        let on_complete = props.on_complete.clone();
        let t = props.timings;
        use_effect_with(game.completion(), move |reason| {
            let handle = (*reason).map(|reason| {
                let delay = match reason {
                    FinishReason::Exhausted => t.catch_exhausted_ms,
                    FinishReason::Threshold => t.catch_threshold_ms,
                };
                clog(&format!("catch: finished ({:?})", reason));
                Timeout::new(delay, move || on_complete.emit(()))
            });
            move || drop(handle)
        });
    }

    let on_start = {
        let game = game.clone();
        let area = area.clone();
        Callback::from(move |_: MouseEvent| {
            if anchor_or_log::<Element>(&area, "catch-area", "catch").is_none() {
                return;
            }
            measure(&area, &game, None);
            game.dispatch(CatchAction::Start);
        })
    };
    let on_mouse_move = {
        let game = game.clone();
        let area = area.clone();
        Callback::from(move |e: MouseEvent| {
            if game.started() {
                measure(&area, &game, Some(e.client_x() as f64));
            }
        })
    };
    let on_touch_move = {
        let game = game.clone();
        let area = area.clone();
        Callback::from(move |e: TouchEvent| {
            if !game.started() {
                return;
            }
            if let Some(t) = e.touches().item(0) {
                measure(&area, &game, Some(t.client_x() as f64));
            }
        })
    };

    let show_toast = {
        let toast = toast.clone();
        let toast_timer = toast_timer.clone();
        let compliments = props.compliments.clone();
        let life = props.timings.compliment_toast_ms;
        Callback::from(move |name: String| {
            let fallback;
            let list: &[String] = match &compliments {
                Some(list) => list.as_slice(),
                None => {
                    fallback = default_compliments();
                    fallback.as_slice()
                }
            };
            let Some(msg) = pick_message(&mut rand::thread_rng(), list) else {
                return;
            };
            toast.set(Some(format!("{} — {}", name, msg)));
            let toast = toast.clone();
            *toast_timer.borrow_mut() = Some(Timeout::new(life, move || toast.set(None)));
        })
    };

    let prop_of = |kind: usize| props.prop_kinds.get(kind).or_else(|| props.prop_kinds.first());
    let size = game.rules().item_size;
    let basket = game.basket_rect();

    let label = if game.is_finished() {
        "Finished!"
    } else if game.started() {
        "Catching..."
    } else {
        "Start Catching!"
    };

    html! {
        <>
            <button class="catch-start" disabled={game.started()} onclick={on_start}>{ label }</button>
            <div class="catch-score">
                { format!("Caught {} / {}", game.caught().len(), game.rules().catch_goal) }
            </div>
            <div
                id="catch-area"
                class="catch-area"
                ref={area}
                style="touch-action:none;"
                onmousemove={on_mouse_move}
                ontouchmove={on_touch_move}
            >
                { for game.falling().iter().map(|item| {
                    let (src, name) = prop_of(item.kind)
                        .map(|p| (p.image.clone(), p.name.clone()))
                        .unwrap_or_default();
                    html! {
                        <img
                            key={item.id}
                            class="catch-item"
                            src={src}
                            alt={name}
                            style={format!(
                                "position:absolute; left:{:.1}px; top:{:.1}px; width:{}px; height:{}px;",
                                item.left, item.top, size, size
                            )}
                        />
                    }
                }) }
                <div
                    class="catch-basket"
                    style={format!(
                        "position:absolute; left:{:.1}px; bottom:0; width:{}px; height:{}px;",
                        basket.left, basket.width, basket.height
                    )}
                >{"🧺"}</div>
            </div>
            <div class="caught-list">
                { for game.caught().iter().map(|c| {
                    let (src, name) = prop_of(c.kind)
                        .map(|p| (p.image.clone(), p.name.clone()))
                        .unwrap_or_default();
                    html! {
                        <button
                            key={c.id}
                            class="caught-item"
                            title={name.clone()}
                            onclick={show_toast.reform({
                                let name = name.clone();
                                move |_: MouseEvent| name.clone()
                            })}
                        >
                            <img src={src} alt={name} />
                        </button>
                    }
                }) }
            </div>
            {
                if let Some(msg) = &*toast {
                    html! { <div class="compliment-toast">{ msg.clone() }</div> }
                } else {
                    html! {}
                }
            }
        </>
    }
}
