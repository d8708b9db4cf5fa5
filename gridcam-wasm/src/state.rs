use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, Window};

use gridcam_core::{Controller, Geometry, Puzzle};

use crate::render::RenderLoop;

/// Shared application state. Owned by `start` and cloned into every event
/// closure behind `Rc<RefCell<_>>`; there is no global singleton.
pub struct State {
    pub window: Window,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub video: HtmlVideoElement,
    pub rng: SmallRng,
    /// `None` until the webcam reports its frame dimensions.
    pub puzzle: Option<Puzzle>,
    pub geometry: Option<Geometry>,
    pub controller: Controller,
    pub render_loop: Option<RenderLoop>,
    /// Pending highlight-expiry timeout, replaced on every drop so only
    /// the latest drop's timer fires.
    pub highlight_timer: Option<i32>,
    pub highlight_closure: Option<Closure<dyn FnMut()>>,
}

impl Drop for State {
    /// Clean teardown when the hosting context releases the last clone:
    /// cancel the pending highlight expiry and stop the render loop.
    fn drop(&mut self) {
        if let Some(handle) = self.highlight_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        drop(self.highlight_closure.take());
        if let Some(render_loop) = self.render_loop.take() {
            render_loop.stop();
        }
    }
}

pub type SharedState = Rc<RefCell<State>>;
