#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Parameter generation and uniform synchronisation for a procedural
//! cell/flow shader.
//!
//! The crate is split into a platform-independent core (theme catalog,
//! sampler, view and clock controllers, uniform bridge) and a thin WebGL2
//! front end that is only compiled for `wasm32`.

pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod params;
pub mod sampler;
pub mod session;
pub mod theme;
pub mod uniforms;
pub mod view;

pub use canvas::{fit_canvas, CanvasSize};
pub use clock::{AnimationClock, AnimationState};
pub use config::{ClockConfig, SamplerConfig, SketchConfig, ViewConfig};
pub use error::{Result, SketchError};
pub use params::{LineworkConfig, LineworkMode, PalettePair, ParameterSet, RdPair, ThemedValues};
pub use sampler::ParameterSampler;
pub use session::{FrameInput, FrameReport, KeyCommand, SessionOptions, Sketch};
pub use theme::{Theme, ThemeCatalog, ThemeChoice, ThemedParam, RANDOM_THEME};
pub use uniforms::{RecordingSink, UniformSink, UniformSyncBridge, UniformValue, SLOTS};
pub use view::{PointerSample, ViewTransform, ViewTransformController, ZoomKeys};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod logging;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        logging::install();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("c")
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::start(canvas)?;
        Ok(())
    }
}
