//! Drag-to-pan and key-held zoom.

use crate::config::ViewConfig;

/// Pan offset and zoom applied by the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

/// Pointer state for one frame, as delivered by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Screen-space position; `None` when the host has no position yet.
    pub position: Option<(f64, f64)>,
    pub primary_pressed: bool,
}

/// Which zoom keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoomKeys {
    pub zoom_in: bool,
    pub zoom_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Dragging { last: (f64, f64) },
}

pub struct ViewTransformController {
    transform: ViewTransform,
    phase: DragPhase,
    config: ViewConfig,
    redraw_requested: bool,
}

impl ViewTransformController {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            transform: ViewTransform {
                pan_x: 0.0,
                pan_y: 0.0,
                scale: quantize(config.initial_scale, &config),
            },
            phase: DragPhase::Idle,
            config,
            redraw_requested: false,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Step the scale once per held zoom key, then round and clamp.
    pub fn apply_zoom(&mut self, keys: ZoomKeys) {
        let mut scale = self.transform.scale;
        if keys.zoom_in {
            scale += self.config.zoom_step;
        }
        if keys.zoom_out {
            scale -= self.config.zoom_step;
        }
        self.transform.scale = quantize(scale, &self.config);
    }

    /// Feed one pointer sample through the drag state machine.
    ///
    /// The first pressed sample only records a baseline; releasing clears it
    /// so the next press never jumps.
    pub fn apply_pointer(&mut self, sample: PointerSample) {
        if !sample.primary_pressed {
            self.phase = DragPhase::Idle;
            return;
        }
        let Some((x, y)) = sample.position else {
            return;
        };
        if let DragPhase::Dragging { last: (px, py) } = self.phase {
            let dx = x - px;
            let dy = y - py;
            let scale = self.transform.scale;
            // Screen y grows downwards, shader y grows upwards.
            self.transform.pan_x -= dx * scale;
            self.transform.pan_y += dy * scale;
        }
        self.phase = DragPhase::Dragging { last: (x, y) };
    }

    /// Return the pan to the origin. Scale is left alone.
    pub fn reset(&mut self) {
        self.transform.pan_x = 0.0;
        self.transform.pan_y = 0.0;
        self.redraw_requested = true;
    }

    /// Whether a reset asked for an immediate redraw; clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

/// One decimal place, inside the configured band.
fn quantize(scale: f64, config: &ViewConfig) -> f64 {
    ((scale * 10.0).round() / 10.0).clamp(config.min_scale, config.max_scale)
}
