#![cfg(target_arch = "wasm32")]

use cellflow::{fit_canvas, SketchConfig};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_viewport_fits_portrait_canvas() {
    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap();
    let h = window.inner_height().unwrap().as_f64().unwrap();

    let aspect = SketchConfig::default().aspect_ratio;
    let size = fit_canvas(w, h, aspect);

    assert!(size.width <= w && size.height <= h);
    assert!((size.aspect() - aspect).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn webgl2_context_is_available() {
    use wasm_bindgen::JsCast;

    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert!(canvas.get_context("webgl2").unwrap().is_some());
}
