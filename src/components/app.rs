use gloo::timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    catch::CatchScene, finale::FinalAct, gate::ContentGate, matching::MatchScene,
    opening::{CurtainOverlay, OpeningAct}, puzzle::PuzzleScene,
};
use crate::config::{Timings, default_props};
use crate::content::load_compliments;
use crate::model::{Act, Scene, ShowAction, ShowState};
use crate::util::{apply_body_layout, clog, cwarn, scroll_to_top};

const CENTERED_ACT: &str = "display:flex; flex-direction:column; justify-content:center; min-height:100vh;";

#[derive(Properties, PartialEq, Clone)]
struct SceneFrameProps {
    scene: Scene,
    title: AttrValue,
    visible: bool,
    proceed_enabled: bool,
    on_proceed: Callback<Scene>,
    #[prop_or_default]
    children: Html,
}

/// One scene of Act II with its "Mark Complete" control.
#[function_component(SceneFrame)]
fn scene_frame(props: &SceneFrameProps) -> Html {
    let scene = props.scene;
    let onclick = {
        let on_proceed = props.on_proceed.clone();
        Callback::from(move |_: MouseEvent| on_proceed.emit(scene))
    };
    html! {
        <div id={scene.dom_id()} class={classes!("scene", (!props.visible).then_some("hidden"))}>
            <h2>{ props.title.clone() }</h2>
            { props.children.clone() }
            <div class="controls">
                <button
                    id={format!("s{}-complete", scene.index() + 1)}
                    class="small"
                    disabled={!props.proceed_enabled}
                    {onclick}
                >
                    {"Mark Complete"}
                </button>
            </div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let show = use_reducer(ShowState::new);
    let timings = Timings::default();
    let shaking = use_state(|| false);
    let compliments = use_state(|| None::<Rc<Vec<String>>>);
    let props_kinds = use_memo((), |_| default_props());
    let act2_timer = use_mut_ref(|| None::<Timeout>);
    let mounted_at = *use_state(js_sys::Date::now);

    // Layout and scroll follow every act change
    {
        let stage = show.stage;
        let layout = show.body_layout();
        use_effect_with(show.layout_epoch, move |_| {
            if let Err(e) = apply_body_layout(layout) {
                cwarn(&format!("show: {}", e));
            }
            scroll_to_top();
            clog(&format!("show: {} (+{:.0} ms)", stage, js_sys::Date::now() - mounted_at));
            || ()
        });
    }

    // Compliments load once Act II begins
    {
        let compliments = compliments.clone();
        use_effect_with(show.games_started, move |started| {
            if *started {
                spawn_local(async move {
                    compliments.set(Some(Rc::new(load_compliments().await)));
                });
            }
            || ()
        });
    }

    let on_shake = {
        let shaking = shaking.clone();
        Callback::from(move |on: bool| shaking.set(on))
    };
    let on_open = {
        let show = show.clone();
        Callback::from(move |_: ()| show.dispatch(ShowAction::OpenCurtain))
    };
    let on_start = {
        let show = show.clone();
        let act2_timer = act2_timer.clone();
        let delay = timings.act2_delay_ms;
        Callback::from(move |_: ()| {
            let show = show.clone();
            *act2_timer.borrow_mut() = Some(Timeout::new(delay, move || {
                show.dispatch(ShowAction::EnterPlayful)
            }));
        })
    };
    let on_proceed = {
        let show = show.clone();
        Callback::from(move |scene: Scene| show.dispatch(ShowAction::Proceed(scene)))
    };
    let scene_done = |scene: Scene| {
        let show = show.clone();
        Callback::from(move |_: ()| show.dispatch(ShowAction::SceneComplete(scene)))
    };
    let on_gate_finish = {
        let show = show.clone();
        Callback::from(move |_: ()| show.dispatch(ShowAction::GateFinished))
    };

    let act_class = |act: Act| classes!("act", (!show.act_visible(act)).then_some("hidden"));
    let act_style = |act: Act| show.centers_act(act).then_some(CENTERED_ACT);
    let frame = |scene: Scene, title: &'static str, body: Html| {
        html! {
            <SceneFrame
                {scene}
                title={title}
                visible={show.scene_visible(scene)}
                proceed_enabled={show.proceed_enabled(scene)}
                on_proceed={on_proceed.clone()}
            >
                { body }
            </SceneFrame>
        }
    };

    let games = show.games_started;
    html! {
        <>
            <CurtainOverlay open={show.curtain_open} shaking={*shaking} />
            <section id={Act::Opening.dom_id()} class={act_class(Act::Opening)} style={act_style(Act::Opening)}>
                <OpeningAct {timings} {on_shake} {on_open} {on_start} />
            </section>

            <section id={Act::Playful.dom_id()} class={act_class(Act::Playful)} style={act_style(Act::Playful)}>
                <div class="stage-header">{"Act II — The Playful Acts"}</div>
                { frame(Scene::Puzzle, "Scene 1 — The Puppy Puzzle", if games {
                    html! { <PuzzleScene {timings} on_complete={scene_done(Scene::Puzzle)} /> }
                } else { html! {} }) }
                { frame(Scene::Match, "Scene 2 — The Ensemble Cast (Matching Game)", if games {
                    html! { <MatchScene {timings} on_complete={scene_done(Scene::Match)} /> }
                } else { html! {} }) }
                { frame(Scene::Catch, "Scene 3 — Backstage Chaos (Catch Props)", if games {
                    html! {
                        <CatchScene
                            {timings}
                            prop_kinds={props_kinds.clone()}
                            compliments={(*compliments).clone()}
                            on_complete={scene_done(Scene::Catch)}
                        />
                    }
                } else { html! {} }) }
            </section>

            <section id={Act::Question.dom_id()} class={act_class(Act::Question)} style={act_style(Act::Question)}>
                <div class="stage-header">{"Act III — A Question Waiting to Be Asked"}</div>
                if show.gate_started {
                    <ContentGate on_finish={on_gate_finish} />
                }
            </section>

            <section id={Act::Finale.dom_id()} class={act_class(Act::Finale)} style={act_style(Act::Finale)}>
                if show.act_visible(Act::Finale) {
                    <FinalAct {timings} />
                }
            </section>
        </>
    }
}
