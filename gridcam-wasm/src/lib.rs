use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlVideoElement};

use gridcam_core::Controller;

mod canvas;
mod constants;
mod events;
mod render;
mod state;
mod utils;
mod video;

use state::State;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;
    let video_el = init_video(&document)?;

    let state = Rc::new(RefCell::new(State {
        window,
        canvas,
        ctx,
        video: video_el,
        rng: SmallRng::seed_from_u64(js_sys::Date::now() as u64),
        puzzle: None,
        geometry: None,
        controller: Controller::default(),
        render_loop: None,
        highlight_timer: None,
        highlight_closure: None,
    }));

    events::attach_input(state.clone())?;
    // The puzzle itself is built once the webcam reports its metadata.
    video::start_webcam(state);
    Ok(())
}

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("puzzleCanvas")
        .ok_or_else(|| JsValue::from_str("canvas #puzzleCanvas not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

fn init_video(document: &Document) -> Result<HtmlVideoElement, JsValue> {
    document
        .get_element_by_id("webcam")
        .ok_or_else(|| JsValue::from_str("video #webcam not found"))?
        .dyn_into::<HtmlVideoElement>()
        .map_err(|_| JsValue::from_str("#webcam is not a <video> element"))
}
