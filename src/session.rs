//! Per-session state and the frame/event entry points the host calls.

use rand::Rng;

use crate::canvas::{fit_canvas, CanvasSize};
use crate::clock::{AnimationClock, AnimationState};
use crate::config::SketchConfig;
use crate::error::Result;
use crate::params::{LineworkConfig, ParameterSet};
use crate::sampler::ParameterSampler;
use crate::theme::{ThemeCatalog, ThemeChoice};
use crate::uniforms::{UniformSink, UniformSyncBridge};
use crate::view::{PointerSample, ViewTransform, ViewTransformController, ZoomKeys};

/// Host-supplied choices that are not part of the tuning config.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Force a theme instead of drawing one. Unknown ids fall back to random.
    pub theme: Option<String>,
    pub catalog: ThemeCatalog,
}

/// Discrete keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    DecreasePaletteThreshold,
    IncreasePaletteThreshold,
    ToggleFreeRun,
    ResetPan,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Self::DecreasePaletteThreshold),
            "2" => Some(Self::IncreasePaletteThreshold),
            "s" | "S" => Some(Self::ToggleFreeRun),
            "r" | "R" => Some(Self::ResetPan),
            _ => None,
        }
    }
}

/// Key held for zooming in.
pub const ZOOM_IN_KEY: &str = "ArrowUp";
/// Key held for zooming out.
pub const ZOOM_OUT_KEY: &str = "ArrowDown";

/// Input snapshot read once at the start of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerSample,
    pub zoom: ZoomKeys,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_idx: u64,
    pub elapsed_time: f64,
    /// Something the shader reads changed since the last report, or a reset
    /// asked for an immediate redraw. A host may skip drawing otherwise.
    pub redraw_requested: bool,
    /// Periodic status line, present every `status_interval` frames.
    pub status: Option<String>,
}

pub struct Sketch<S> {
    theme: ThemeChoice,
    params: ParameterSet,
    linework: LineworkConfig,
    view: ViewTransformController,
    clock: AnimationClock,
    bridge: UniformSyncBridge<S>,
    canvas: CanvasSize,
    aspect_ratio: f64,
    palette_threshold_step: f32,
    status_interval: u64,
    frame_idx: u64,
    /// Transform and time as of the last report.
    presented: (ViewTransform, f64),
    dirty: bool,
}

impl<S: UniformSink> Sketch<S> {
    /// Pick a theme, sample the parameters and push every uniform once.
    pub fn new<R: Rng + ?Sized>(
        config: SketchConfig,
        options: &SessionOptions,
        rng: &mut R,
        sink: S,
        viewport: (f64, f64),
    ) -> Result<Self> {
        let sampler = ParameterSampler::new(options.catalog, config.sampler)?;
        let requested = match &options.theme {
            Some(id) => id.as_str(),
            None => sampler.select_theme(rng),
        };
        let theme = match sampler.catalog().resolve(requested) {
            Ok(theme) => theme,
            Err(err) => {
                tracing::warn!(%err, "using unconstrained parameters");
                ThemeChoice::Random
            }
        };
        let params = sampler.sample(theme.id(), rng);
        tracing::info!(
            theme = theme.name(),
            description = theme.description(),
            "selected theme"
        );
        tracing::info!(?params, "sampled parameters");

        let linework = config.linework;
        tracing::info!(
            enabled = linework.enabled,
            intensity = linework.intensity,
            threshold = linework.threshold,
            mode = linework.mode.name(),
            "linework overlay"
        );

        let canvas = fit_canvas(viewport.0, viewport.1, config.aspect_ratio);
        let view = ViewTransformController::new(config.view);
        let clock = AnimationClock::new(config.clock);
        let mut bridge = UniformSyncBridge::new(sink);
        bridge.push_initial(&params, &view.transform(), &linework, canvas);
        let presented = (view.transform(), clock.elapsed_time());

        Ok(Self {
            theme,
            params,
            linework,
            view,
            clock,
            bridge,
            canvas,
            aspect_ratio: config.aspect_ratio,
            palette_threshold_step: config.palette_threshold_step,
            status_interval: config.status_interval,
            frame_idx: 0,
            presented,
            dirty: true,
        })
    }

    /// Run one frame: clock, zoom, drag, then the per-frame uniform push.
    pub fn frame(&mut self, input: FrameInput, now_secs: f64) -> FrameReport {
        self.frame_idx += 1;
        self.clock.tick(now_secs);
        self.view.apply_zoom(input.zoom);
        self.view.apply_pointer(input.pointer);

        let transform = self.view.transform();
        let elapsed = self.clock.elapsed_time();
        self.bridge.push_frame(&transform, elapsed, &self.params);

        if self.frame_idx == 1 && self.linework.enabled {
            tracing::info!(mode = self.linework.mode.name(), "linework enabled");
        }
        let status = (self.status_interval > 0 && self.frame_idx % self.status_interval == 0)
            .then(|| {
                let line = self.status_line();
                tracing::debug!(frame = self.frame_idx, "{line}");
                line
            });

        let reset = self.view.take_redraw_request();
        let presented = (transform, elapsed);
        let moved = std::mem::replace(&mut self.presented, presented) != presented;
        let redraw_requested = std::mem::take(&mut self.dirty) || reset || moved;

        FrameReport {
            frame_idx: self.frame_idx,
            elapsed_time: elapsed,
            redraw_requested,
            status,
        }
    }

    /// Handle a key press. Returns the command it mapped to, if any.
    pub fn key_pressed(&mut self, key: &str) -> Option<KeyCommand> {
        let command = KeyCommand::from_key(key)?;
        self.apply_command(command);
        Some(command)
    }

    pub fn apply_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::DecreasePaletteThreshold => {
                self.params
                    .adjust_palette_threshold(-self.palette_threshold_step);
                self.bridge.push_on_key_command(&self.params);
                self.dirty = true;
            }
            KeyCommand::IncreasePaletteThreshold => {
                self.params
                    .adjust_palette_threshold(self.palette_threshold_step);
                self.bridge.push_on_key_command(&self.params);
                self.dirty = true;
            }
            KeyCommand::ToggleFreeRun => {
                if self.clock.toggle_free_run() {
                    tracing::debug!(
                        free_running = self.clock.state().is_free_running,
                        "animation toggled"
                    );
                } else {
                    tracing::debug!("free-run unavailable until the intro finishes");
                }
            }
            KeyCommand::ResetPan => self.view.reset(),
        }
    }

    /// Refit the canvas to a new viewport and push the resolution.
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> CanvasSize {
        self.canvas = fit_canvas(viewport_width, viewport_height, self.aspect_ratio);
        self.bridge.push_on_resize(self.canvas);
        self.dirty = true;
        self.canvas
    }

    pub fn status_line(&self) -> String {
        let p = &self.params;
        let linework = if self.linework.enabled {
            format!(" | Linework:ON({:.2})", self.linework.intensity)
        } else {
            String::new()
        };
        format!(
            "Theme: {} | Domain-Warp: {} | Scale: {} | Cell:{} | Depth:{} | Flow:{:.3} | Noise:{:.6} | Freq:{:.4} | LayerThresh:{:.2} | Falloff:{:.2}{}",
            self.theme.name(),
            p.domain_warp_intensity,
            self.view.transform().scale,
            p.cell_size,
            p.max_depth,
            p.flow_speed,
            p.noise_scale,
            p.frequency,
            p.layer_noise_threshold,
            p.depth_falloff_rate,
            linework,
        )
    }

    pub fn theme(&self) -> ThemeChoice {
        self.theme
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn linework(&self) -> &LineworkConfig {
        &self.linework
    }

    pub fn view(&self) -> ViewTransform {
        self.view.transform()
    }

    pub fn animation(&self) -> AnimationState {
        self.clock.state()
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    pub fn sink(&self) -> &S {
        self.bridge.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.bridge.sink_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::{RecordingSink, UniformValue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sketch(theme: &str) -> Sketch<RecordingSink> {
        let options = SessionOptions {
            theme: Some(theme.to_owned()),
            ..SessionOptions::default()
        };
        Sketch::new(
            SketchConfig::default(),
            &options,
            &mut StdRng::seed_from_u64(7),
            RecordingSink::new(),
            (1000.0, 1000.0),
        )
        .unwrap()
    }

    #[test]
    fn key_mapping() {
        assert_eq!(KeyCommand::from_key("1"), Some(KeyCommand::DecreasePaletteThreshold));
        assert_eq!(KeyCommand::from_key("S"), Some(KeyCommand::ToggleFreeRun));
        assert_eq!(KeyCommand::from_key("r"), Some(KeyCommand::ResetPan));
        assert_eq!(KeyCommand::from_key("x"), None);
    }

    #[test]
    fn unknown_requested_theme_falls_back_to_random() {
        let s = sketch("plaid");
        assert!(matches!(s.theme(), ThemeChoice::Random));
    }

    #[test]
    fn palette_threshold_is_clamped_and_pushed() {
        let mut s = sketch("wave");
        s.sink_mut().clear();
        for _ in 0..5 {
            s.key_pressed("1");
        }
        assert_eq!(s.params().palette_threshold, 0.0);
        assert_eq!(
            s.sink().latest("u_paletteThreshold"),
            Some(UniformValue::Float(0.0))
        );
        for _ in 0..15 {
            s.key_pressed("2");
        }
        assert_eq!(s.params().palette_threshold, 1.0);
        assert_eq!(s.sink().count("u_paletteThreshold"), 20);
    }

    #[test]
    fn unmapped_keys_push_nothing() {
        let mut s = sketch("wave");
        s.sink_mut().clear();
        assert_eq!(s.key_pressed("q"), None);
        assert!(s.sink().writes().is_empty());
    }

    #[test]
    fn status_line_appears_on_interval() {
        let mut s = sketch("liquid");
        let reports: Vec<_> = (1..=120)
            .map(|i| s.frame(FrameInput::default(), f64::from(i) / 60.0))
            .collect();
        let with_status: Vec<_> = reports
            .iter()
            .filter(|r| r.status.is_some())
            .map(|r| r.frame_idx)
            .collect();
        assert_eq!(with_status, vec![60, 120]);
        let line = reports[59].status.as_deref().unwrap();
        assert!(line.starts_with("Theme: Liquid"));
        assert!(line.contains("Linework:ON(0.30)"));
    }

    fn settled(theme: &str) -> Sketch<RecordingSink> {
        let mut s = sketch(theme);
        for i in 1..=100 {
            s.frame(FrameInput::default(), f64::from(i) / 60.0);
        }
        s
    }

    #[test]
    fn reset_reports_redraw_on_next_frame() {
        let mut s = settled("neural");
        s.key_pressed("R");
        let report = s.frame(FrameInput::default(), 2.0);
        assert!(report.redraw_requested);
        let report = s.frame(FrameInput::default(), 2.016);
        assert!(!report.redraw_requested);
    }

    #[test]
    fn intro_frames_always_redraw() {
        let mut s = sketch("vortex");
        for i in 1..=100 {
            let report = s.frame(FrameInput::default(), f64::from(i) / 60.0);
            assert!(report.redraw_requested, "frame {i}");
        }
    }

    #[test]
    fn settled_idle_sketch_stops_redrawing_until_something_changes() {
        let mut s = settled("cellular");
        assert!(!s.frame(FrameInput::default(), 3.0).redraw_requested);

        s.key_pressed("2");
        assert!(s.frame(FrameInput::default(), 3.1).redraw_requested);
        assert!(!s.frame(FrameInput::default(), 3.2).redraw_requested);

        s.resize(640.0, 480.0);
        assert!(s.frame(FrameInput::default(), 3.3).redraw_requested);

        let zoom = FrameInput {
            zoom: ZoomKeys {
                zoom_in: true,
                zoom_out: false,
            },
            ..FrameInput::default()
        };
        assert!(s.frame(zoom, 3.4).redraw_requested);

        s.key_pressed("s");
        assert!(s.frame(FrameInput::default(), 3.5).redraw_requested);
    }
}
