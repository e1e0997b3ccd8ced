//! Mapping from session state to the renderer's named uniform slots.
//!
//! [`SLOTS`] is the single list of slot names. Each entry says where its value
//! comes from; the push methods on [`UniformSyncBridge`] filter that list by
//! source instead of repeating the names.

use crate::canvas::CanvasSize;
use crate::params::{LineworkConfig, ParameterSet};
use crate::view::ViewTransform;

use UniformValue::{Float, Int, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

/// Write side of the renderer's uniform store.
pub trait UniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

impl<S: UniformSink + ?Sized> UniformSink for &mut S {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        (**self).set_uniform(name, value);
    }
}

/// Sink that keeps every write in order. Used by the headless preview.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    writes: Vec<(String, UniformValue)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(String, UniformValue)] {
        &self.writes
    }

    /// Most recent value written to `name`.
    pub fn latest(&self, name: &str) -> Option<UniformValue> {
        self.writes
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn count(&self, name: &str) -> usize {
        self.writes.iter().filter(|(n, _)| n == name).count()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl UniformSink for RecordingSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.writes.push((name.to_owned(), value));
    }
}

/// Where a slot's value is read from.
#[derive(Clone, Copy)]
pub enum Binding {
    Canvas(fn(CanvasSize) -> UniformValue),
    /// Frozen after initialisation.
    Param(fn(&ParameterSet) -> UniformValue),
    /// Changed by key commands; re-sent every frame.
    LiveParam(fn(&ParameterSet) -> UniformValue),
    Linework(fn(&LineworkConfig) -> UniformValue),
    View(fn(&ViewTransform) -> UniformValue),
    Time,
}

pub struct Slot {
    pub name: &'static str,
    pub binding: Binding,
}

impl Slot {
    pub fn is_frame_varying(&self) -> bool {
        matches!(
            self.binding,
            Binding::View(_) | Binding::Time | Binding::LiveParam(_)
        )
    }
}

/// Slot names are part of the shader contract; do not rename.
pub const SLOTS: &[Slot] = &[
    Slot {
        name: "u_resolution",
        binding: Binding::Canvas(|c| Vec2([c.width as f32, c.height as f32])),
    },
    Slot {
        name: "u_cellSize",
        binding: Binding::Param(|p| Float(p.cell_size)),
    },
    Slot {
        name: "u_flowSpeed",
        binding: Binding::Param(|p| Float(p.flow_speed)),
    },
    Slot {
        name: "u_paletteIndex1",
        binding: Binding::Param(|p| Int(p.palette.first as i32)),
    },
    Slot {
        name: "u_paletteIndex2",
        binding: Binding::Param(|p| Int(p.palette.second as i32)),
    },
    Slot {
        name: "u_noiseSeed",
        binding: Binding::Param(|p| Float(p.noise_seed)),
    },
    Slot {
        name: "u_randomScaleSeed",
        binding: Binding::Param(|p| Float(p.random_scale_seed)),
    },
    Slot {
        name: "u_rotationAngle",
        binding: Binding::Param(|p| Float(p.rotation_rad())),
    },
    Slot {
        name: "u_noiseOffset",
        binding: Binding::Param(|p| Vec2(p.noise_offset)),
    },
    Slot {
        name: "u_amplitude",
        binding: Binding::Param(|p| Float(p.amplitude)),
    },
    Slot {
        name: "u_maxDepth",
        binding: Binding::Param(|p| Float(p.max_depth)),
    },
    Slot {
        name: "u_paletteThreshold",
        binding: Binding::LiveParam(|p| Float(p.palette_threshold)),
    },
    Slot {
        name: "u_reactionInfluence",
        binding: Binding::Param(|p| Float(p.reaction_influence)),
    },
    Slot {
        name: "u_caInfluence",
        binding: Binding::Param(|p| Float(p.ca_influence)),
    },
    Slot {
        name: "u_rdParameterA",
        binding: Binding::Param(|p| Float(p.rd.a)),
    },
    Slot {
        name: "u_rdParameterB",
        binding: Binding::Param(|p| Float(p.rd.b)),
    },
    Slot {
        name: "u_seed",
        binding: Binding::Param(|p| Float(p.seed)),
    },
    Slot {
        name: "u_frequency",
        binding: Binding::Param(|p| Float(p.frequency)),
    },
    Slot {
        name: "u_noiseScale",
        binding: Binding::Param(|p| Float(p.noise_scale)),
    },
    Slot {
        name: "u_domainWarpIntensity",
        binding: Binding::Param(|p| Float(p.domain_warp_intensity)),
    },
    Slot {
        name: "u_layerNoiseThreshold",
        binding: Binding::Param(|p| Float(p.layer_noise_threshold)),
    },
    Slot {
        name: "u_depthFalloffRate",
        binding: Binding::Param(|p| Float(p.depth_falloff_rate)),
    },
    Slot {
        name: "u_lineworkEnabled",
        binding: Binding::Linework(|l| Float(if l.enabled { 1.0 } else { 0.0 })),
    },
    Slot {
        name: "u_lineworkIntensity",
        binding: Binding::Linework(|l| Float(l.intensity)),
    },
    Slot {
        name: "u_lineworkThreshold",
        binding: Binding::Linework(|l| Float(l.threshold)),
    },
    Slot {
        name: "u_lineworkColor",
        binding: Binding::Linework(|l| Vec3(l.color)),
    },
    Slot {
        name: "u_lineworkWidth",
        binding: Binding::Linework(|l| Float(l.width)),
    },
    Slot {
        name: "u_lineworkType",
        binding: Binding::Linework(|l| Float(l.mode.index() as f32)),
    },
    Slot {
        name: "u_scaleFactor",
        binding: Binding::View(|v| Float(v.scale as f32)),
    },
    Slot {
        name: "u_translation",
        binding: Binding::View(|v| Vec2([v.pan_x as f32, v.pan_y as f32])),
    },
    Slot {
        name: "u_time",
        binding: Binding::Time,
    },
];

/// Pushes session state into a [`UniformSink`].
///
/// `push_initial` must run before any of the incremental pushes.
pub struct UniformSyncBridge<S> {
    sink: S,
    initialized: bool,
}

impl<S: UniformSink> UniformSyncBridge<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            initialized: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write every slot exactly once. Time starts at zero.
    pub fn push_initial(
        &mut self,
        params: &ParameterSet,
        view: &ViewTransform,
        linework: &LineworkConfig,
        canvas: CanvasSize,
    ) {
        for slot in SLOTS {
            let value = match slot.binding {
                Binding::Canvas(f) => f(canvas),
                Binding::Param(f) | Binding::LiveParam(f) => f(params),
                Binding::Linework(f) => f(linework),
                Binding::View(f) => f(view),
                Binding::Time => Float(0.0),
            };
            self.sink.set_uniform(slot.name, value);
        }
        self.initialized = true;
    }

    /// Write the frame-varying slots: view, time and live parameters.
    pub fn push_frame(&mut self, view: &ViewTransform, elapsed: f64, live: &ParameterSet) {
        self.assert_initialized();
        for slot in SLOTS {
            let value = match slot.binding {
                Binding::View(f) => f(view),
                Binding::Time => Float(elapsed as f32),
                Binding::LiveParam(f) => f(live),
                _ => continue,
            };
            self.sink.set_uniform(slot.name, value);
        }
    }

    pub fn push_on_resize(&mut self, canvas: CanvasSize) {
        self.assert_initialized();
        for slot in SLOTS {
            if let Binding::Canvas(f) = slot.binding {
                self.sink.set_uniform(slot.name, f(canvas));
            }
        }
    }

    /// Write the key-tunable slots after a key command changed one of them.
    pub fn push_on_key_command(&mut self, params: &ParameterSet) {
        self.assert_initialized();
        for slot in SLOTS {
            if let Binding::LiveParam(f) = slot.binding {
                self.sink.set_uniform(slot.name, f(params));
            }
        }
    }

    fn assert_initialized(&self) {
        debug_assert!(
            self.initialized,
            "uniform store written incrementally before the initial push"
        );
    }
}
