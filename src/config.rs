//! Tunable constants for a session.
//!
//! Defaults reproduce the stock look; hosts may override individual fields
//! before handing the config to [`crate::Sketch::new`].

use crate::params::{LineworkConfig, RdPair};

/// Pools the sampler draws untethered parameters from.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    pub max_depth_options: Vec<f32>,
    pub rotation_options_deg: Vec<f32>,
    pub frequency_options: Vec<f32>,
    pub domain_warp_options: Vec<f32>,
    pub noise_scale_options: Vec<f32>,
    pub amplitude_options: Vec<f32>,
    /// Reaction-diffusion coefficients. Always drawn as a pair.
    pub rd_pairs: Vec<RdPair>,
    /// Palette indices are drawn from `0..palette_pool`. Must be at least 2.
    pub palette_pool: u32,
    pub noise_offset_max: f32,
    pub noise_seed_max: f32,
    pub random_scale_seed_max: f32,

    // Fixed values that no pool or theme overrides unless constrained.
    pub cell_size: f32,
    pub flow_speed: f32,
    pub reaction_influence: f32,
    pub ca_influence: f32,
    pub layer_noise_threshold: f32,
    pub depth_falloff_rate: f32,
    pub palette_threshold: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_depth_options: vec![1500.0, 2000.0, 2500.0],
            rotation_options_deg: vec![0.0, 30.0, 60.0, 90.0],
            frequency_options: vec![0.01, 0.005, 0.001],
            domain_warp_options: vec![0.0, 1.0, 3.0, 6.0, 10.0],
            noise_scale_options: vec![0.00001, 0.00004, 0.0001],
            amplitude_options: vec![0.1],
            rd_pairs: vec![
                RdPair::new(0.5, 1.0),
                RdPair::new(0.1, 0.1),
                RdPair::new(0.8, 0.2),
                RdPair::new(1.0, 1.0),
                RdPair::new(0.3, 0.7),
                RdPair::new(1.2, 1.2),
                RdPair::new(0.05, 0.9),
                RdPair::new(0.7, 1.8),
                RdPair::new(0.3, 0.3),
                RdPair::new(1.0, 4.0),
            ],
            palette_pool: 34,
            noise_offset_max: 2000.0,
            noise_seed_max: 1000.0,
            random_scale_seed_max: 1000.0,
            cell_size: 3.0,
            flow_speed: 0.05,
            reaction_influence: 2.0,
            ca_influence: 0.5,
            layer_noise_threshold: 0.65,
            depth_falloff_rate: 0.85,
            palette_threshold: 0.25,
        }
    }
}

/// Pan/zoom policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub initial_scale: f64,
    /// Scale change per input sample while a zoom key is held.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            initial_scale: 30.0,
            zoom_step: 10.1,
            min_scale: 2.0,
            max_scale: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockConfig {
    /// Ticks the intro sweep runs before manual control unlocks.
    pub intro_frames: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { intro_frames: 100 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    pub sampler: SamplerConfig,
    pub view: ViewConfig,
    pub clock: ClockConfig,
    pub linework: LineworkConfig,
    /// Palette threshold change per key press.
    pub palette_threshold_step: f32,
    /// Canvas width / height.
    pub aspect_ratio: f64,
    /// Emit a status line every this many frames; 0 disables it.
    pub status_interval: u64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            view: ViewConfig::default(),
            clock: ClockConfig::default(),
            linework: LineworkConfig::default(),
            palette_threshold_step: 0.1,
            aspect_ratio: 4.0 / 5.0,
            status_interval: 60,
        }
    }
}
