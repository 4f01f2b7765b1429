use gloo::dialogs::alert;
use std::rc::Rc;
use yew::prelude::*;

use super::effects::ParticleBurst;
use crate::config::{NO_MESSAGE, Timings, YES_MESSAGE};
use crate::model::Finale;
use crate::model::effects::{Particle, confetti_burst};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct FinalActProps {
    pub timings: Timings,
}

#[function_component(FinalAct)]
pub fn final_act(props: &FinalActProps) -> Html {
    let finale = use_state(Finale::default);
    let confetti = use_state(|| None::<Rc<Vec<Particle>>>);

    let on_yes = {
        let finale = finale.clone();
        let confetti = confetti.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *finale;
            if !next.accept() {
                return;
            }
            clog("finale: yes");
            finale.set(next);
            confetti.set(Some(Rc::new(confetti_burst(&mut rand::thread_rng()))));
        })
    };
    let on_dodge = {
        let finale = finale.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *finale;
            if next.dodge(&mut rand::thread_rng()) {
                finale.set(next);
            }
        })
    };
    let on_no = Callback::from(|_: MouseEvent| alert(NO_MESSAGE));
    let on_confetti_done = {
        let confetti = confetti.clone();
        Callback::from(move |_: ()| confetti.set(None))
    };

    let answered = finale.answered();
    html! {
        <div class="stage">
            <h1 class="final-question">{"Can I be yours, please?"}</h1>
            <div class="final-buttons">
                <button class="yes" disabled={answered} onclick={on_yes}>{"Yes!"}</button>
                <button
                    class="no"
                    disabled={answered}
                    style={format!("transform:translateX({:.0}px);", finale.no_offset())}
                    onmouseover={on_dodge}
                    onclick={on_no}
                >
                    {"Think Again 👀"}
                </button>
            </div>
            <div class={classes!("final-msg", (!answered).then_some("hidden"))}>
                { if answered { YES_MESSAGE } else { "" } }
            </div>
            {
                if let Some(particles) = &*confetti {
                    html! {
                        <ParticleBurst
                            particles={particles.clone()}
                            life_ms={props.timings.confetti_life_ms}
                            on_done={on_confetti_done}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
