//! Generation-time parameter values and the linework overlay descriptor.

use crate::theme::ThemedParam;

/// Matched reaction-diffusion coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdPair {
    pub a: f32,
    pub b: f32,
}

impl RdPair {
    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }
}

/// Two distinct palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalettePair {
    pub first: u32,
    pub second: u32,
}

/// Values a theme may pin. `None` means the theme left it alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThemedValues {
    pub cell_size: Option<f32>,
    pub max_depth: Option<f32>,
    pub flow_speed: Option<f32>,
    pub noise_scale: Option<f32>,
    pub frequency: Option<f32>,
}

impl ThemedValues {
    pub fn get(&self, param: ThemedParam) -> Option<f32> {
        match param {
            ThemedParam::CellSize => self.cell_size,
            ThemedParam::MaxDepth => self.max_depth,
            ThemedParam::FlowSpeed => self.flow_speed,
            ThemedParam::NoiseScale => self.noise_scale,
            ThemedParam::Frequency => self.frequency,
        }
    }

    pub fn set(&mut self, param: ThemedParam, value: f32) {
        let slot = match param {
            ThemedParam::CellSize => &mut self.cell_size,
            ThemedParam::MaxDepth => &mut self.max_depth,
            ThemedParam::FlowSpeed => &mut self.flow_speed,
            ThemedParam::NoiseScale => &mut self.noise_scale,
            ThemedParam::Frequency => &mut self.frequency,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        ThemedParam::ALL.iter().all(|&p| self.get(p).is_none())
    }
}

/// Everything the pattern needs that is decided once per session.
///
/// Only `palette_threshold` changes after creation, through
/// [`crate::Sketch::key_pressed`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub cell_size: f32,
    pub max_depth: f32,
    pub flow_speed: f32,
    pub noise_scale: f32,
    pub frequency: f32,
    pub palette: PalettePair,
    pub rotation_deg: f32,
    pub noise_seed: f32,
    pub noise_offset: [f32; 2],
    pub random_scale_seed: f32,
    /// Global shader seed in `[0, 1)`.
    pub seed: f32,
    pub domain_warp_intensity: f32,
    pub amplitude: f32,
    pub rd: RdPair,
    pub reaction_influence: f32,
    pub ca_influence: f32,
    pub layer_noise_threshold: f32,
    pub depth_falloff_rate: f32,
    pub palette_threshold: f32,
}

impl ParameterSet {
    /// Overlay themed values; themed entries win over pooled ones.
    pub fn apply_themed(&mut self, themed: &ThemedValues) {
        if let Some(v) = themed.cell_size {
            self.cell_size = v;
        }
        if let Some(v) = themed.max_depth {
            self.max_depth = v;
        }
        if let Some(v) = themed.flow_speed {
            self.flow_speed = v;
        }
        if let Some(v) = themed.noise_scale {
            self.noise_scale = v;
        }
        if let Some(v) = themed.frequency {
            self.frequency = v;
        }
    }

    pub fn rotation_rad(&self) -> f32 {
        self.rotation_deg.to_radians()
    }

    /// Nudge the palette threshold by `delta`, clamped to `[0, 1]`.
    pub fn adjust_palette_threshold(&mut self, delta: f32) {
        self.palette_threshold = (self.palette_threshold + delta).clamp(0.0, 1.0);
    }
}

/// Line extraction applied by the overlay pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineworkMode {
    Edges,
    Contours,
    Ridges,
    Valleys,
}

impl LineworkMode {
    /// Index the shader switches on.
    pub fn index(self) -> u32 {
        match self {
            LineworkMode::Edges => 0,
            LineworkMode::Contours => 1,
            LineworkMode::Ridges => 2,
            LineworkMode::Valleys => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineworkMode::Edges => "edges",
            LineworkMode::Contours => "contours",
            LineworkMode::Ridges => "ridges",
            LineworkMode::Valleys => "valleys",
        }
    }
}

/// Overlay settings. Fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineworkConfig {
    pub enabled: bool,
    pub intensity: f32,
    pub threshold: f32,
    pub color: [f32; 3],
    pub width: f32,
    pub mode: LineworkMode,
}

impl Default for LineworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.3,
            threshold: 0.4,
            color: [1.0, 1.0, 1.0],
            width: 1.0,
            mode: LineworkMode::Ridges,
        }
    }
}
