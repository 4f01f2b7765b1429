use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

use super::effects::ParticleBurst;
use crate::config::Timings;
use crate::model::effects::{Particle, sparkle_burst};
use crate::model::{Curtain, CurtainCue};
use crate::util::{anchor_or_log, clog, element_center};

#[derive(Properties, PartialEq, Clone)]
pub struct CurtainOverlayProps {
    pub open: bool,
    pub shaking: bool,
}

#[function_component(CurtainOverlay)]
pub fn curtain_overlay(props: &CurtainOverlayProps) -> Html {
    html! {
        <div id="curtain-overlay" class={classes!(props.open.then_some("curtain-open"))}>
            <div class={classes!("curtain", "left", props.shaking.then_some("shake"))}></div>
            <div class={classes!("curtain", "right", props.shaking.then_some("shake"))}></div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct OpeningActProps {
    pub timings: Timings,
    pub on_shake: Callback<bool>,
    pub on_open: Callback<()>,
    /// Fires once, after the curtain has started opening.
    pub on_start: Callback<()>,
}

#[function_component(OpeningAct)]
pub fn opening_act(props: &OpeningActProps) -> Html {
    let curtain = use_mut_ref(Curtain::default);
    let cue_timers = use_mut_ref(Vec::<Timeout>::new);
    let force = use_force_update();
    let title_in = use_state(|| false);
    let subtitle_in = use_state(|| false);
    let sparkles = use_state(|| None::<Rc<Vec<Particle>>>);
    let button_ref = use_node_ref();

    // Entrance fades
    {
        let title_in = title_in.clone();
        let subtitle_in = subtitle_in.clone();
        let t = props.timings;
        use_effect_with((), move |_| {
            let title = Timeout::new(t.title_fade_ms, move || title_in.set(true));
            let subtitle = Timeout::new(t.subtitle_fade_ms, move || subtitle_in.set(true));
            move || {
                drop(title);
                drop(subtitle);
            }
        });
    }

    let on_click = {
        let curtain = curtain.clone();
        let cue_timers = cue_timers.clone();
        let force = force.clone();
        let sparkles = sparkles.clone();
        let button_ref = button_ref.clone();
        let props = props.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(cues) = curtain.borrow_mut().start(&props.timings) else {
                return;
            };
            clog("curtain: start");
            if let Some(btn) = anchor_or_log::<web_sys::Element>(&button_ref, "startBtn", "curtain") {
                let (x, y) = element_center(&btn);
                sparkles.set(Some(Rc::new(sparkle_burst(&mut rand::thread_rng(), x, y))));
            }
            props.on_shake.emit(true);
            force.force_update();

            let mut timers = cue_timers.borrow_mut();
            for cue in cues {
                let curtain = curtain.clone();
                let force = force.clone();
                let props = props.clone();
                timers.push(Timeout::new(cue.at_ms(), move || {
                    let signal = curtain.borrow_mut().apply(cue);
                    force.force_update();
                    match cue {
                        CurtainCue::EndShake { .. } => props.on_shake.emit(false),
                        CurtainCue::Open { .. } => props.on_open.emit(()),
                        CurtainCue::Signal { .. } => {
                            if signal {
                                clog("curtain: signal");
                                props.on_start.emit(());
                            }
                        }
                    }
                }));
            }
        })
    };

    let enabled = curtain.borrow().button_enabled();
    let fade = |shown: bool| {
        if shown {
            "opacity:1; transform:translateY(0); transition:all 0.8s ease;"
        } else {
            "opacity:0; transform:translateY(12px);"
        }
    };

    html! {
        <div class="stage">
            <h1 class="title" style={fade(*title_in)}>
                {"Tonight's Feature"}<br/>
                <span class="subtitle" style={fade(*subtitle_in)}>{"A Play About Us"}</span>
            </h1>
            <button
                id="startBtn"
                ref={button_ref}
                class={classes!("playbill", enabled.then_some("pulse"))}
                disabled={!enabled}
                onclick={on_click}
            >
                {"Start the Show"}
            </button>
            {
                if let Some(particles) = &*sparkles {
                    html! { <ParticleBurst particles={particles.clone()} life_ms={props.timings.sparkle_life_ms} /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
