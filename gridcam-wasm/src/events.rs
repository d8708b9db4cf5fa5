use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MouseEvent, TouchEvent};

use gridcam_core::{DropKind, DropOutcome, HIGHLIGHT_MS};

use crate::constants::SOLVED_MESSAGE;
use crate::state::{SharedState, State};
use crate::utils::{canvas_point, log};

/// Wire the mouse and touch adapters. Both feed the same controller;
/// they differ only in how coordinates are pulled out of their events.
pub fn attach_input(state: SharedState) -> Result<(), JsValue> {
    attach_mouse(state.clone())?;
    attach_touch(state)
}

fn attach_mouse(state: SharedState) -> Result<(), JsValue> {
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let s = &mut *s;
            let at = canvas_point(&s.canvas, e.client_x() as f64, e.client_y() as f64);
            if let (Some(puzzle), Some(geometry)) = (s.puzzle.as_mut(), s.geometry) {
                s.controller.press(puzzle, &geometry, at);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let s = &mut *s;
            let at = canvas_point(&s.canvas, e.client_x() as f64, e.client_y() as f64);
            if let Some(puzzle) = s.puzzle.as_mut() {
                s.controller.drag_move(puzzle, at);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        // Listening on the window means a release outside the canvas
        // still ends the drag.
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let s = &mut *s;
            let at = canvas_point(&s.canvas, e.client_x() as f64, e.client_y() as f64);
            if let (Some(puzzle), Some(geometry)) = (s.puzzle.as_mut(), s.geometry) {
                if let Some(outcome) = s.controller.release(puzzle, &geometry, Some(at)) {
                    handle_drop(&st, s, outcome);
                }
            }
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }
    Ok(())
}

fn attach_touch(state: SharedState) -> Result<(), JsValue> {
    {
        let st = state.clone();
        let touchstart = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            // primary contact only; additional fingers are ignored
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            let mut s = st.borrow_mut();
            let s = &mut *s;
            let at = canvas_point(&s.canvas, touch.client_x() as f64, touch.client_y() as f64);
            if let (Some(puzzle), Some(geometry)) = (s.puzzle.as_mut(), s.geometry) {
                s.controller.press(puzzle, &geometry, at);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
        touchstart.forget();
    }
    {
        let st = state.clone();
        let touchmove = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            let mut s = st.borrow_mut();
            let s = &mut *s;
            let at = canvas_point(&s.canvas, touch.client_x() as f64, touch.client_y() as f64);
            if let Some(puzzle) = s.puzzle.as_mut() {
                s.controller.drag_move(puzzle, at);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref())?;
        touchmove.forget();
    }
    {
        // touchend carries no coordinates; the drop lands at the last
        // floating position.
        let st = state.clone();
        let touchend = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |_e: TouchEvent| {
            let mut s = st.borrow_mut();
            let s = &mut *s;
            if let (Some(puzzle), Some(geometry)) = (s.puzzle.as_mut(), s.geometry) {
                if let Some(outcome) = s.controller.release(puzzle, &geometry, None) {
                    handle_drop(&st, s, outcome);
                }
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref())?;
        touchend.forget();
    }
    Ok(())
}

/// Common drop handling for both input families: log the transition,
/// restart the highlight expiry and announce a fresh solve.
fn handle_drop(st: &SharedState, s: &mut State, outcome: DropOutcome) {
    if let Some(puzzle) = s.puzzle.as_ref() {
        match outcome.kind {
            DropKind::Swapped { with } => log(&format!(
                "swap {} <-> {}: {}",
                outcome.index,
                with,
                serde_json::to_string(puzzle.tiles()).unwrap_or_default()
            )),
            DropKind::Moved { to } => log(&format!(
                "move {} -> ({}, {}): {}",
                outcome.index,
                to.x,
                to.y,
                serde_json::to_string(&puzzle.tile(outcome.index)).unwrap_or_default()
            )),
        }
    }
    schedule_highlight_clear(st, s, outcome.highlight_token);
    if outcome.solved {
        let _ = s.window.alert_with_message(SOLVED_MESSAGE);
    }
}

/// Replace the pending expiry so only the latest drop's timer fires. The
/// core's epoch token makes a stale callback harmless even if
/// cancellation were missed.
fn schedule_highlight_clear(st: &SharedState, s: &mut State, token: u64) {
    if let Some(handle) = s.highlight_timer.take() {
        s.window.clear_timeout_with_handle(handle);
    }
    let st2 = st.clone();
    let clear = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let mut s = st2.borrow_mut();
        s.highlight_timer = None;
        if let Some(puzzle) = s.puzzle.as_mut() {
            puzzle.clear_highlight(token);
        }
    }));
    match s.window.set_timeout_with_callback_and_timeout_and_arguments_0(
        clear.as_ref().unchecked_ref(),
        HIGHLIGHT_MS as i32,
    ) {
        Ok(handle) => {
            s.highlight_timer = Some(handle);
            // keep the closure alive until it fires or is replaced
            s.highlight_closure = Some(clear);
        }
        Err(err) => log(&format!("failed to schedule highlight expiry: {err:?}")),
    }
}
