use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{DragEvent, TouchEvent};
use yew::prelude::*;

use crate::config::{PUZZLE_PIECE_FOLDER, Timings};
use crate::model::puzzle::PIECE_COUNT;
use crate::model::{PieceId, PieceStatus, PuzzleAction, PuzzleBoard};
use crate::state::{TouchDrag, TouchRelease};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct PuzzleSceneProps {
    pub timings: Timings,
    pub on_complete: Callback<()>,
    #[prop_or(AttrValue::Static(PUZZLE_PIECE_FOLDER))]
    pub piece_folder: AttrValue,
}

/// Where a touch drag was released.
enum DropTarget {
    Slot(usize),
    Bank,
}

fn touch_point(e: &TouchEvent) -> Option<(f64, f64)> {
    let t = e.touches().item(0).or_else(|| e.changed_touches().item(0))?;
    Some((t.client_x() as f64, t.client_y() as f64))
}

/// Hit-tests the viewport point under a released touch.
fn drop_target_at(x: f64, y: f64) -> Option<DropTarget> {
    let document = web_sys::window()?.document()?;
    let hit = document.element_from_point(x as f32, y as f32)?;
    if let Ok(Some(slot)) = hit.closest("[data-slot]") {
        let index = slot.get_attribute("data-slot")?.parse::<usize>().ok()?;
        return Some(DropTarget::Slot(index));
    }
    match hit.closest(".puzzle-bank") {
        Ok(Some(_)) => Some(DropTarget::Bank),
        _ => None,
    }
}

struct PieceCtx {
    board: UseReducerHandle<PuzzleBoard>,
    touch: Rc<RefCell<TouchDrag>>,
    touch_offset: UseStateHandle<Option<(PieceId, f64, f64)>>,
    folder: AttrValue,
}

fn piece_view(ctx: &PieceCtx, piece: PieceId) -> Html {
    let board = &ctx.board;
    let status = board.status(piece);
    let selected = board.selected == Some(piece);
    let dragging = board.dragging == Some(piece);
    let status_class = match status {
        PieceStatus::Banked => "banked",
        PieceStatus::Correct => "correct",
        PieceStatus::Misplaced => "misplaced",
    };
    let follow = match *ctx.touch_offset {
        Some((p, dx, dy)) if p == piece => {
            format!("transform:translate({:.0}px, {:.0}px); pointer-events:none; z-index:20;", dx, dy)
        }
        _ => String::new(),
    };

    let on_drag_start = {
        let board = board.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(dt) = e.data_transfer() {
                dt.set_effect_allowed("move");
                let _ = dt.set_data("text/plain", &piece.0.to_string());
            }
            board.dispatch(PuzzleAction::BeginDrag(piece));
        })
    };
    let on_drag_end = {
        let board = board.clone();
        Callback::from(move |_: DragEvent| board.dispatch(PuzzleAction::CancelDrag))
    };
    let on_click = {
        let board = board.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            board.dispatch(PuzzleAction::TapPiece(piece));
        })
    };
    let on_touch_start = {
        let touch = ctx.touch.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some((x, y)) = touch_point(&e) {
                touch.borrow_mut().begin(piece, x, y);
            }
        })
    };
    let on_touch_move = {
        let touch = ctx.touch.clone();
        let board = board.clone();
        let touch_offset = ctx.touch_offset.clone();
        Callback::from(move |e: TouchEvent| {
            let Some((x, y)) = touch_point(&e) else {
                return;
            };
            let mut t = touch.borrow_mut();
            if t.piece != Some(piece) {
                return;
            }
            let was_moving = t.moved;
            t.update(x, y);
            if t.moved {
                if !was_moving {
                    board.dispatch(PuzzleAction::BeginDrag(piece));
                }
                let (dx, dy) = t.offset();
                touch_offset.set(Some((piece, dx, dy)));
            }
        })
    };
    let on_touch_end = {
        let touch = ctx.touch.clone();
        let board = board.clone();
        let touch_offset = ctx.touch_offset.clone();
        Callback::from(move |e: TouchEvent| {
            // suppress the emulated click that follows a touch
            e.prevent_default();
            touch_offset.set(None);
            let Some(release) = touch.borrow_mut().release() else {
                return;
            };
            match release {
                TouchRelease::Tap(p) => board.dispatch(PuzzleAction::TapPiece(p)),
                TouchRelease::Drop { x, y, .. } => match drop_target_at(x, y) {
                    Some(DropTarget::Slot(slot)) => board.dispatch(PuzzleAction::DropOnSlot(slot)),
                    Some(DropTarget::Bank) => board.dispatch(PuzzleAction::DropOnBank),
                    None => board.dispatch(PuzzleAction::CancelDrag),
                },
            }
        })
    };
    let on_touch_cancel = {
        let touch = ctx.touch.clone();
        let board = board.clone();
        let touch_offset = ctx.touch_offset.clone();
        Callback::from(move |_: TouchEvent| {
            touch.borrow_mut().cancel();
            touch_offset.set(None);
            board.dispatch(PuzzleAction::CancelDrag);
        })
    };

    html! {
        <div
            key={piece.0}
            class={classes!(
                "puzzle-piece",
                status_class,
                selected.then_some("selected"),
                dragging.then_some("dragging")
            )}
            draggable="true"
            data-piece={piece.0.to_string()}
            style={follow}
            ondragstart={on_drag_start}
            ondragend={on_drag_end}
            onclick={on_click}
            ontouchstart={on_touch_start}
            ontouchmove={on_touch_move}
            ontouchend={on_touch_end}
            ontouchcancel={on_touch_cancel}
        >
            <img src={piece.image_path(&ctx.folder)} draggable="false" alt={format!("piece {}", piece.0 + 1)} />
        </div>
    }
}

#[function_component(PuzzleScene)]
pub fn puzzle_scene(props: &PuzzleSceneProps) -> Html {
    let board = use_reducer(|| PuzzleBoard::new(&mut rand::thread_rng()));
    let touch = use_mut_ref(TouchDrag::default);
    let touch_offset = use_state(|| None::<(PieceId, f64, f64)>);
    let hover_slot = use_state(|| None::<usize>);
    let hover_bank = use_state(|| false);

    // Completion, after the celebration pulse
    {
        let on_complete = props.on_complete.clone();
        let delay = props.timings.puzzle_celebrate_ms;
        use_effect_with(board.completion_fired(), move |fired| {
            let handle = if *fired {
                clog("puzzle: solved");
                Some(Timeout::new(delay, move || on_complete.emit(())))
            } else {
                None
            };
            move || drop(handle)
        });
    }

    let ctx = PieceCtx {
        board: board.clone(),
        touch: touch.clone(),
        touch_offset: touch_offset.clone(),
        folder: props.piece_folder.clone(),
    };

    let slots = (0..PIECE_COUNT).map(|slot| {
        let on_drag_over = {
            let hover_slot = hover_slot.clone();
            Callback::from(move |e: DragEvent| {
                e.prevent_default();
                if *hover_slot != Some(slot) {
                    hover_slot.set(Some(slot));
                }
            })
        };
        let on_drag_leave = {
            let hover_slot = hover_slot.clone();
            Callback::from(move |_: DragEvent| hover_slot.set(None))
        };
        let on_drop = {
            let hover_slot = hover_slot.clone();
            let board = board.clone();
            Callback::from(move |e: DragEvent| {
                e.prevent_default();
                hover_slot.set(None);
                board.dispatch(PuzzleAction::DropOnSlot(slot));
            })
        };
        let on_click = {
            let board = board.clone();
            Callback::from(move |_: MouseEvent| board.dispatch(PuzzleAction::TapSlot(slot)))
        };
        let occupant = board.occupant(slot);
        let highlight = *hover_slot == Some(slot) && occupant.is_none();
        html! {
            <div
                key={slot}
                class={classes!("puzzle-slot", highlight.then_some("drop-hover"))}
                data-slot={slot.to_string()}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
                onclick={on_click}
            >
                { occupant.map(|p| piece_view(&ctx, p)).unwrap_or_default() }
            </div>
        }
    });

    let on_bank_over = {
        let hover_bank = hover_bank.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            if !*hover_bank {
                hover_bank.set(true);
            }
        })
    };
    let on_bank_leave = {
        let hover_bank = hover_bank.clone();
        Callback::from(move |_: DragEvent| hover_bank.set(false))
    };
    let on_bank_drop = {
        let hover_bank = hover_bank.clone();
        let board = board.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            hover_bank.set(false);
            board.dispatch(PuzzleAction::DropOnBank);
        })
    };
    let on_bank_click = {
        let board = board.clone();
        Callback::from(move |_: MouseEvent| board.dispatch(PuzzleAction::TapBank))
    };
    let on_reset = {
        let board = board.clone();
        let touch = touch.clone();
        let touch_offset = touch_offset.clone();
        Callback::from(move |_: MouseEvent| {
            touch.borrow_mut().cancel();
            touch_offset.set(None);
            board.dispatch(PuzzleAction::Reset);
        })
    };

    let solved = board.completion_fired() && board.is_solved();
    html! {
        <>
            <div class={classes!("puzzle-board", solved.then_some("solved"))}>
                { for slots }
            </div>
            <button class="puzzle-reset" onclick={on_reset}>{"Reset Puzzle"}</button>
            <div
                class={classes!("puzzle-bank", (*hover_bank).then_some("drop-hover"))}
                ondragover={on_bank_over}
                ondragleave={on_bank_leave}
                ondrop={on_bank_drop}
                onclick={on_bank_click}
            >
                { for board.bank().iter().map(|p| piece_view(&ctx, *p)) }
            </div>
            <div class="puzzle-hint">
                { format!("{} / {} placed", board.placed_count(), PIECE_COUNT) }
            </div>
        </>
    }
}
