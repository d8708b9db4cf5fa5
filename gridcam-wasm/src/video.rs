use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints};

use gridcam_core::{Geometry, Puzzle};

use crate::constants::GRID_SIZE;
use crate::render;
use crate::state::SharedState;
use crate::utils::log;

/// Request the webcam and, once its metadata is known, build the puzzle
/// and start the render loop. If the camera is unavailable or denied the
/// puzzle never initializes and the page shows an empty canvas.
pub fn start_webcam(state: SharedState) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = acquire(state).await {
            log(&format!("webcam unavailable: {err:?}"));
        }
    });
}

async fn acquire(state: SharedState) -> Result<(), JsValue> {
    let window = state.borrow().window.clone();
    let devices = window.navigator().media_devices()?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::from_bool(true));
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

    let video = state.borrow().video.clone();
    video.set_src_object(Some(&stream));

    let st = state.clone();
    let onloaded = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        {
            let mut s = st.borrow_mut();
            let _ = s.video.play();
            let s = &mut *s;
            s.geometry = Some(Geometry::new(
                GRID_SIZE,
                s.canvas.width() as f64,
                s.canvas.height() as f64,
            ));
            s.puzzle = Some(Puzzle::new(GRID_SIZE, &mut s.rng));
        }
        let handle = render::start_render_loop(st.clone());
        st.borrow_mut().render_loop = Some(handle);
    }));
    video.set_onloadedmetadata(Some(onloaded.as_ref().unchecked_ref()));
    onloaded.forget();
    Ok(())
}
