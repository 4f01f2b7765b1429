use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

use crate::model::effects::Particle;

/// Delay before particles start moving, so the transition has a start frame.
const RELEASE_MS: u32 = 10;

#[derive(Properties, PartialEq, Clone)]
pub struct ParticleBurstProps {
    pub particles: Rc<Vec<Particle>>,
    pub life_ms: u32,
    #[prop_or_default]
    pub on_done: Callback<()>,
}

#[function_component(ParticleBurst)]
pub fn particle_burst(props: &ParticleBurstProps) -> Html {
    let released = use_state(|| false);
    let alive = use_state(|| true);

    {
        let released = released.clone();
        let alive = alive.clone();
        let life_ms = props.life_ms;
        let on_done = props.on_done.clone();
        use_effect_with((), move |_| {
            let release = Timeout::new(RELEASE_MS, move || released.set(true));
            let expire = Timeout::new(life_ms, move || {
                alive.set(false);
                on_done.emit(());
            });
            move || {
                drop(release);
                drop(expire);
            }
        });
    }

    if !*alive {
        return html! {};
    }
    html! {
        <div class="particle-burst">
            { for props.particles.iter().map(|p| html! {
                <div class="particle" style={p.style(*released)}>{ p.glyph }</div>
            }) }
        </div>
    }
}
