use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::config::Timings;
use crate::model::{MatchAction, MatchBoard};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct MatchSceneProps {
    pub timings: Timings,
    pub on_complete: Callback<()>,
}

#[function_component(MatchScene)]
pub fn match_scene(props: &MatchSceneProps) -> Html {
    let board = use_reducer(|| MatchBoard::new(&mut rand::thread_rng()));

    // Flip a mismatched pair back down once the viewer has seen it
    {
        let board_h = board.clone();
        let delay = props.timings.mismatch_revert_ms;
        use_effect_with(board.pending(), move |pending| {
            let handle = (*pending).map(|(a, b)| {
                Timeout::new(delay, move || board_h.dispatch(MatchAction::Settle(a, b)))
            });
            move || drop(handle)
        });
    }

    {
        let on_complete = props.on_complete.clone();
        let delay = props.timings.match_celebrate_ms;
        use_effect_with(board.completion_fired(), move |fired| {
            let handle = if *fired {
                clog("match: all pairs found");
                Some(Timeout::new(delay, move || on_complete.emit(())))
            } else {
                None
            };
            move || drop(handle)
        });
    }

    let locked = board.is_locked();
    let cards = board.cards().iter().enumerate().map(|(idx, card)| {
        let onclick = {
            let board = board.clone();
            Callback::from(move |_: MouseEvent| board.dispatch(MatchAction::Flip(idx)))
        };
        html! {
            <button
                key={idx}
                class={classes!(
                    "match-card",
                    card.face_up.then_some("flipped"),
                    card.matched.then_some("matched")
                )}
                disabled={card.matched || (locked && !card.face_up)}
                onclick={onclick}
            >
                { card.label() }
            </button>
        }
    });

    html! {
        <>
            <div class="match-grid">
                { for cards }
            </div>
            <div class="match-hint">
                { format!("{} / {} pairs", board.matched_count() / 2, board.cards().len() / 2) }
            </div>
        </>
    }
}
