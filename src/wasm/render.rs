use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    console, window, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent, UrlSearchParams,
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation, Window,
};
use web_time::Instant;

use crate::session::{FrameInput, SessionOptions, Sketch, ZOOM_IN_KEY, ZOOM_OUT_KEY};
use crate::uniforms::{UniformSink, UniformValue};
use crate::{CanvasSize, SketchConfig};

/// Uniform store backed by a linked WebGL program. Locations are looked up
/// once per name; slots the driver optimised away resolve to `None`.
struct GlUniformSink {
    gl: GL,
    program: WebGlProgram,
    locations: HashMap<String, Option<WebGlUniformLocation>>,
}

impl UniformSink for GlUniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let gl = &self.gl;
        let program = &self.program;
        let loc = self
            .locations
            .entry(name.to_owned())
            .or_insert_with(|| gl.get_uniform_location(program, name));
        let Some(loc) = loc.as_ref() else {
            return;
        };
        match value {
            UniformValue::Float(v) => gl.uniform1f(Some(loc), v),
            UniformValue::Int(v) => gl.uniform1i(Some(loc), v),
            UniformValue::Vec2([x, y]) => gl.uniform2f(Some(loc), x, y),
            UniformValue::Vec3([x, y, z]) => gl.uniform3f(Some(loc), x, y, z),
        }
    }
}

/// Input collected by event listeners between frames.
#[derive(Default)]
struct PendingInput {
    frame: FrameInput,
    keys: Vec<String>,
    resized: bool,
}

/// Wire up the canvas and run the sketch until the page goes away.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let program = link_program(
        &gl,
        &shader_source(&document, "vertex-shader")?,
        &shader_source(&document, "fragment-shader")?,
    )?;
    gl.use_program(Some(&program));
    upload_quad(&gl)?;

    let (seed, options) = session_options(&window);
    console::log_1(&format!("seed: {seed}").into());

    let initial_viewport = viewport(&window);
    let sink = GlUniformSink {
        gl: gl.clone(),
        program,
        locations: HashMap::new(),
    };
    let mut sketch = Sketch::new(
        SketchConfig::default(),
        &options,
        &mut StdRng::seed_from_u64(seed),
        sink,
        initial_viewport,
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    console::log_1(&format!("Selected theme: {}", sketch.theme().name()).into());
    console::log_1(&format!("Theme description: {}", sketch.theme().description()).into());
    apply_canvas_size(&window, &canvas, &gl, sketch.canvas());

    let input = Rc::new(RefCell::new(PendingInput::default()));
    listen_pointer(&window, &canvas, &input)?;
    listen_keys(&window, &input)?;

    let resize_closure = {
        let input = input.clone();
        Closure::wrap(Box::new(move || {
            input.borrow_mut().resized = true;
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let started = Instant::now();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Snapshot input once; listeners may fire again before the next frame.
        let (frame_input, keys, resized) = {
            let mut pending = input.borrow_mut();
            let keys = std::mem::take(&mut pending.keys);
            let resized = std::mem::take(&mut pending.resized);
            (pending.frame, keys, resized)
        };
        if resized {
            let (w, h) = viewport(&window);
            let size = sketch.resize(w, h);
            apply_canvas_size(&window, &canvas, &gl, size);
        }
        for key in &keys {
            sketch.key_pressed(key);
        }

        let report = sketch.frame(frame_input, started.elapsed().as_secs_f64());
        if let Some(status) = report.status {
            console::log_1(&format!("Frame: {} {status}", report.frame_idx).into());
        }
        // The last presented image stays on screen when nothing changed.
        if report.redraw_requested {
            gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        }

        if let Some(next) = f.borrow().as_ref() {
            let _ = window.request_animation_frame(next.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}

/// `?seed=<u64>&theme=<id>` override the random seed and theme.
fn session_options(window: &Window) -> (u64, SessionOptions) {
    let params = window
        .location()
        .search()
        .ok()
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok());
    let seed = params
        .as_ref()
        .and_then(|p| p.get("seed"))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64);
    let options = SessionOptions {
        theme: params.as_ref().and_then(|p| p.get("theme")),
        ..SessionOptions::default()
    };
    (seed, options)
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Size the canvas in CSS pixels and back it at device resolution.
fn apply_canvas_size(window: &Window, canvas: &HtmlCanvasElement, gl: &GL, size: CanvasSize) {
    let ratio = window.device_pixel_ratio().max(1.0);
    let backing_w = (size.width * ratio).round() as u32;
    let backing_h = (size.height * ratio).round() as u32;
    canvas.set_width(backing_w);
    canvas.set_height(backing_h);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", size.width));
    let _ = style.set_property("height", &format!("{}px", size.height));
    gl.viewport(0, 0, backing_w as i32, backing_h as i32);
}

fn listen_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    input: &Rc<RefCell<PendingInput>>,
) -> Result<(), JsValue> {
    let down = {
        let input = input.clone();
        let target = canvas.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            if e.button() == 0 {
                // Keeps move and up events coming while the pointer is off the page.
                let _ = target.set_pointer_capture(e.pointer_id());
                let mut pending = input.borrow_mut();
                pending.frame.pointer.primary_pressed = true;
                pending.frame.pointer.position = Some(canvas_position(&target, &e));
            }
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    canvas.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref())?;
    down.forget();

    // Tracked on the window so a drag that leaves the canvas keeps its baseline.
    let moved = {
        let input = input.clone();
        let target = canvas.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            input.borrow_mut().frame.pointer.position = Some(canvas_position(&target, &e));
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    window.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref())?;
    moved.forget();

    // Released anywhere, including outside the canvas.
    let up = {
        let input = input.clone();
        Closure::wrap(Box::new(move |_e: PointerEvent| {
            input.borrow_mut().frame.pointer.primary_pressed = false;
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    for event in ["pointerup", "pointercancel"] {
        window.add_event_listener_with_callback(event, up.as_ref().unchecked_ref())?;
    }
    up.forget();
    Ok(())
}

/// Pointer position relative to the canvas's top-left corner, in CSS pixels.
fn canvas_position(canvas: &HtmlCanvasElement, e: &PointerEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        f64::from(e.client_x()) - rect.left(),
        f64::from(e.client_y()) - rect.top(),
    )
}

fn listen_keys(window: &Window, input: &Rc<RefCell<PendingInput>>) -> Result<(), JsValue> {
    let down = {
        let input = input.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();
            let mut pending = input.borrow_mut();
            if key == ZOOM_IN_KEY {
                pending.frame.zoom.zoom_in = true;
                e.prevent_default();
            } else if key == ZOOM_OUT_KEY {
                pending.frame.zoom.zoom_out = true;
                e.prevent_default();
            } else if !e.repeat() {
                pending.keys.push(key);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
    down.forget();

    let up = {
        let input = input.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();
            let mut pending = input.borrow_mut();
            if key == ZOOM_IN_KEY {
                pending.frame.zoom.zoom_in = false;
            } else if key == ZOOM_OUT_KEY {
                pending.frame.zoom.zoom_out = false;
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
    up.forget();
    Ok(())
}

fn shader_source(document: &Document, id: &str) -> Result<String, JsValue> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .ok_or_else(|| JsValue::from_str(&format!("shader source #{id} not found")))
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile error: {log}")))
    }
}

fn link_program(gl: &GL, vert: &str, frag: &str) -> Result<WebGlProgram, JsValue> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vert)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, frag)?;
    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.bind_attrib_location(&program, 0, "a_position");
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&format!("program link error: {log}")))
    }
}

/// Full-screen triangle strip at attribute 0.
fn upload_quad(gl: &GL) -> Result<(), JsValue> {
    const CORNERS: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
    let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
    gl.bind_vertex_array(Some(&vao));
    let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let data = js_sys::Float32Array::from(&CORNERS[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 2, GL::FLOAT, false, 0, 0);
    gl.disable(GL::DEPTH_TEST);
    gl.disable(GL::STENCIL_TEST);
    Ok(())
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;
    use web_sys::PointerEventInit;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn pointer_event(kind: &str, client_x: f64, client_y: f64) -> PointerEvent {
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_button(0);
        init.set_client_x(client_x as i32);
        init.set_client_y(client_y as i32);
        PointerEvent::new_with_event_init_dict(kind, &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn drag_position_is_tracked_outside_the_canvas() {
        let window = window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .unwrap()
            .dyn_into()
            .unwrap();
        canvas.set_width(100);
        canvas.set_height(100);
        let body = document.body().unwrap();
        body.append_child(&canvas).unwrap();

        let input = Rc::new(RefCell::new(PendingInput::default()));
        listen_pointer(&window, &canvas, &input).unwrap();

        let rect = canvas.get_bounding_client_rect();
        let (left, top) = (rect.left().round(), rect.top().round());
        canvas
            .dispatch_event(&pointer_event("pointerdown", left + 10.0, top + 20.0))
            .unwrap();
        assert_eq!(
            input.borrow().frame.pointer.position,
            Some((left + 10.0 - rect.left(), top + 20.0 - rect.top()))
        );

        // Well past the right edge; the event never reaches the canvas.
        body.dispatch_event(&pointer_event("pointermove", left + 250.0, top + 20.0))
            .unwrap();
        let pointer = input.borrow().frame.pointer;
        assert!(pointer.primary_pressed);
        assert_eq!(
            pointer.position,
            Some((left + 250.0 - rect.left(), top + 20.0 - rect.top()))
        );

        window
            .dispatch_event(&pointer_event("pointerup", left + 250.0, top + 20.0))
            .unwrap();
        assert!(!input.borrow().frame.pointer.primary_pressed);
        body.remove_child(&canvas).unwrap();
    }
}
