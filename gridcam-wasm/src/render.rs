use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use gridcam_core::{Rect, frame_plan};

use crate::canvas::set_stroke_style;
use crate::constants::{
    DRAG_ALPHA, DRAG_STROKE, GRID_STROKE, GRID_STROKE_WIDTH, HIGHLIGHT_INSET, HIGHLIGHT_STROKE,
    HIGHLIGHT_STROKE_WIDTH,
};
use crate::state::{SharedState, State};

/// Handle for the self-rescheduling animation loop. `stop` lets the
/// current frame be the last; dropping the handle does not stop the loop.
pub struct RenderLoop {
    running: Rc<Cell<bool>>,
}

impl RenderLoop {
    pub fn stop(&self) {
        self.running.set(false);
    }
}

/// Drive `draw` from the display refresh callback until stopped.
pub fn start_render_loop(state: SharedState) -> RenderLoop {
    let running = Rc::new(Cell::new(true));
    let flag = running.clone();
    let window = state.borrow().window.clone();
    let win = window.clone();

    type RafClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if !flag.get() {
            return;
        }
        draw(&state.borrow());
        let _ = win.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }) as Box<dyn FnMut(f64)>));
    let _ = window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());

    RenderLoop { running }
}

/// Paint one frame: the grid pass first, then the dragged tile on top at
/// reduced opacity. Reads puzzle state, never mutates it.
pub fn draw(state: &State) {
    let (Some(puzzle), Some(geometry)) = (state.puzzle.as_ref(), state.geometry.as_ref()) else {
        return;
    };
    let ctx = &state.ctx;
    ctx.clear_rect(
        0.0,
        0.0,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
    );

    let plan = frame_plan(puzzle, geometry);
    for sprite in &plan.tiles {
        blit(state, sprite.src, sprite.dst);
        if sprite.highlighted {
            ctx.set_line_width(HIGHLIGHT_STROKE_WIDTH);
            set_stroke_style(ctx, HIGHLIGHT_STROKE);
            ctx.stroke_rect(
                sprite.dst.x + HIGHLIGHT_INSET,
                sprite.dst.y + HIGHLIGHT_INSET,
                sprite.dst.w - 2.0 * HIGHLIGHT_INSET,
                sprite.dst.h - 2.0 * HIGHLIGHT_INSET,
            );
        } else {
            ctx.set_line_width(GRID_STROKE_WIDTH);
            set_stroke_style(ctx, GRID_STROKE);
            ctx.stroke_rect(sprite.dst.x, sprite.dst.y, sprite.dst.w, sprite.dst.h);
        }
    }

    if let Some(sprite) = &plan.dragged {
        ctx.set_global_alpha(DRAG_ALPHA);
        blit(state, sprite.src, sprite.dst);
        ctx.set_global_alpha(1.0);
        ctx.set_line_width(GRID_STROKE_WIDTH);
        set_stroke_style(ctx, DRAG_STROKE);
        ctx.stroke_rect(sprite.dst.x, sprite.dst.y, sprite.dst.w, sprite.dst.h);
    }
}

fn blit(state: &State, src: Rect, dst: Rect) {
    let _ = state
        .ctx
        .draw_image_with_html_video_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            &state.video,
            src.x,
            src.y,
            src.w,
            src.h,
            dst.x,
            dst.y,
            dst.w,
            dst.h,
        );
}
