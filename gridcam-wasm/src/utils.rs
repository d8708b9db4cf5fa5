use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use gridcam_core::Point;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Convert client coordinates into canvas internal pixel coordinates so
/// hit testing works even if CSS scales the canvas element.
pub fn canvas_point(cv: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Point {
    if let Some(el) = cv.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        Point {
            x: (client_x - rect.left()) * (cv.width() as f64) / rect.width().max(1.0),
            y: (client_y - rect.top()) * (cv.height() as f64) / rect.height().max(1.0),
        }
    } else {
        Point {
            x: client_x,
            y: client_y,
        }
    }
}
