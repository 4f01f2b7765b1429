use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::content::load_letter;
use crate::model::{GateAction, GatePhase, PinGate};
use crate::util::{clog, cwarn};

const KEYPAD: [&str; 12] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "Clear", "0", "Enter"];

#[derive(Properties, PartialEq, Clone)]
pub struct ContentGateProps {
    pub on_finish: Callback<()>,
}

#[function_component(ContentGate)]
pub fn content_gate(props: &ContentGateProps) -> Html {
    let gate = use_reducer(PinGate::default);
    let letter = use_state(|| None::<String>);
    // Handle that the window keydown closure reads the latest state from
    let gate_ref = use_mut_ref(|| gate.clone());
    *gate_ref.borrow_mut() = gate.clone();

    // Letter fetch, started as soon as the gate mounts
    {
        let letter = letter.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                letter.set(Some(load_letter().await));
            });
            || ()
        });
    }

    // Keyboard entry while locked
    {
        let gate_ref = gate_ref.clone();
        use_effect_with((), move |_| {
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let handle = gate_ref.borrow().clone();
                if handle.phase() != GatePhase::Locked {
                    return;
                }
                let key = e.key();
                let action = match key.as_str() {
                    "Enter" => GateAction::Submit,
                    "Escape" => GateAction::Clear,
                    k if k.len() == 1 && k.chars().all(|c| c.is_ascii_digit()) => {
                        GateAction::Digit(k.chars().next().unwrap_or('0'))
                    }
                    _ => return,
                };
                e.prevent_default();
                handle.dispatch(action);
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(win) = &window {
                if win
                    .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .is_err()
                {
                    cwarn("gate: keyboard entry unavailable");
                }
            }
            move || {
                if let Some(win) = window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(keydown_cb);
            }
        });
    }

    // Finish signal, once
    {
        let on_finish = props.on_finish.clone();
        let skipped = gate.skipped();
        use_effect_with(gate.phase(), move |phase| {
            if *phase == GatePhase::Finished {
                clog(if skipped { "gate: skipped" } else { "gate: finished" });
                on_finish.emit(());
            }
            || ()
        });
    }

    let on_skip = {
        let gate = gate.clone();
        Callback::from(move |_: MouseEvent| gate.dispatch(GateAction::Skip))
    };

    match gate.phase() {
        GatePhase::Locked => {
            let keys = KEYPAD.iter().map(|label| {
                let action = match *label {
                    "Clear" => GateAction::Clear,
                    "Enter" => GateAction::Submit,
                    digit => GateAction::Digit(digit.chars().next().unwrap_or('0')),
                };
                let onclick = {
                    let gate = gate.clone();
                    Callback::from(move |_: MouseEvent| gate.dispatch(action.clone()))
                };
                let wide = label.len() > 1;
                html! {
                    <button key={*label} class={classes!("pin-key", wide.then_some("pin-action"))} onclick={onclick}>
                        { *label }
                    </button>
                }
            });
            html! {
                <div class="gate locked">
                    <p class="gate-prompt">{"Enter the code to open the letter"}</p>
                    <div class="pin-display" aria-label="entered digits">{ gate.mask() }</div>
                    <div class="pin-pad">
                        { for keys }
                    </div>
                    <p class="pin-feedback">
                        { gate.feedback().map(|f| f.message()).unwrap_or_default() }
                    </p>
                    <button class="gate-skip" onclick={on_skip}>{"Skip"}</button>
                </div>
            }
        }
        GatePhase::Finished if gate.skipped() => html! {
            <div class="gate skipped"></div>
        },
        GatePhase::Unlocked | GatePhase::Finished => {
            let on_continue = {
                let gate = gate.clone();
                Callback::from(move |_: MouseEvent| gate.dispatch(GateAction::Finish))
            };
            let text = match &*letter {
                Some(text) => text.clone(),
                None => "Loading...".to_string(),
            };
            html! {
                <div class="gate unlocked">
                    <pre class="letter">{ text }</pre>
                    <button
                        class="gate-continue"
                        disabled={gate.phase() == GatePhase::Finished}
                        onclick={on_continue}
                    >
                        {"Continue"}
                    </button>
                </div>
            }
        }
    }
}
