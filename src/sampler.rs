//! Seeded parameter selection.
//!
//! All randomness comes from the caller's `Rng`, so a fixed seed and theme
//! reproduce the same [`ParameterSet`] on every platform.

use rand::Rng;

use crate::config::SamplerConfig;
use crate::error::{Result, SketchError};
use crate::params::{PalettePair, ParameterSet, RdPair, ThemedValues};
use crate::theme::{ThemeCatalog, ThemeChoice, RANDOM_THEME};

pub struct ParameterSampler {
    catalog: ThemeCatalog,
    config: SamplerConfig,
}

impl ParameterSampler {
    /// Validate the pools up front so sampling itself cannot fail.
    pub fn new(catalog: ThemeCatalog, config: SamplerConfig) -> Result<Self> {
        if config.palette_pool < 2 {
            return Err(SketchError::PalettePoolTooSmall(config.palette_pool as usize));
        }
        let pools: [(&'static str, usize); 6] = [
            ("max_depth_options", config.max_depth_options.len()),
            ("rotation_options_deg", config.rotation_options_deg.len()),
            ("frequency_options", config.frequency_options.len()),
            ("domain_warp_options", config.domain_warp_options.len()),
            ("noise_scale_options", config.noise_scale_options.len()),
            ("amplitude_options", config.amplitude_options.len()),
        ];
        if let Some((name, _)) = pools.iter().find(|(_, len)| *len == 0) {
            return Err(SketchError::EmptyPool(name));
        }
        if config.rd_pairs.is_empty() {
            return Err(SketchError::EmptyPool("rd_pairs"));
        }
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Uniform pick over every preset plus the `"random"` sentinel.
    pub fn select_theme<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        let themes = self.catalog.list_themes();
        let idx = rng.gen_range(0..=themes.len());
        themes.get(idx).map_or(RANDOM_THEME, |t| t.id)
    }

    /// Sample only what `theme_id` constrains.
    ///
    /// `"random"` and unknown identifiers yield an empty set, leaving every
    /// value to the pools in [`sample_unconstrained`](Self::sample_unconstrained).
    pub fn sample_constrained<R: Rng + ?Sized>(&self, theme_id: &str, rng: &mut R) -> ThemedValues {
        let mut themed = ThemedValues::default();
        let theme = match self.catalog.resolve(theme_id) {
            Ok(ThemeChoice::Preset(theme)) => theme,
            Ok(ThemeChoice::Random) => return themed,
            Err(err) => {
                tracing::warn!(%err, "falling back to unconstrained sampling");
                return themed;
            }
        };
        for &(param, range) in theme.ranges {
            let value = rng.gen_range(range.min..=range.max);
            tracing::debug!(theme = theme.id, param = param.name(), value, "themed parameter");
            themed.set(param, value);
        }
        themed
    }

    /// Fill every parameter from the fixed pools and defaults.
    pub fn sample_unconstrained<R: Rng + ?Sized>(&self, rng: &mut R) -> ParameterSet {
        let cfg = &self.config;
        let noise_offset = [
            rng.gen::<f32>() * cfg.noise_offset_max,
            rng.gen::<f32>() * cfg.noise_offset_max,
        ];
        let noise_seed = rng.gen::<f32>() * cfg.noise_seed_max;
        let max_depth = pick(rng, &cfg.max_depth_options);
        let palette = self.sample_palette_pair(rng);
        let random_scale_seed = rng.gen::<f32>() * cfg.random_scale_seed_max;
        let rotation_deg = pick(rng, &cfg.rotation_options_deg);
        let frequency = pick(rng, &cfg.frequency_options);
        let domain_warp_intensity = pick(rng, &cfg.domain_warp_options);
        let noise_scale = pick(rng, &cfg.noise_scale_options);
        let amplitude = pick(rng, &cfg.amplitude_options);
        let rd = self.sample_rd_pair(rng);
        let seed = rng.gen::<f32>();

        ParameterSet {
            cell_size: cfg.cell_size,
            max_depth,
            flow_speed: cfg.flow_speed,
            noise_scale,
            frequency,
            palette,
            rotation_deg,
            noise_seed,
            noise_offset,
            random_scale_seed,
            seed,
            domain_warp_intensity,
            amplitude,
            rd,
            reaction_influence: cfg.reaction_influence,
            ca_influence: cfg.ca_influence,
            layer_noise_threshold: cfg.layer_noise_threshold,
            depth_falloff_rate: cfg.depth_falloff_rate,
            palette_threshold: cfg.palette_threshold,
        }
    }

    /// Two distinct indices in `0..palette_pool`; the second is redrawn on collision.
    pub fn sample_palette_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> PalettePair {
        let pool = self.config.palette_pool;
        let first = rng.gen_range(0..pool);
        let mut second = rng.gen_range(0..pool);
        while second == first {
            second = rng.gen_range(0..pool);
        }
        PalettePair { first, second }
    }

    fn sample_rd_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> RdPair {
        let pairs = &self.config.rd_pairs;
        pairs[rng.gen_range(0..pairs.len())]
    }

    /// Full session set: pooled values overlaid with the theme's constraints.
    pub fn sample<R: Rng + ?Sized>(&self, theme_id: &str, rng: &mut R) -> ParameterSet {
        let themed = self.sample_constrained(theme_id, rng);
        let mut params = self.sample_unconstrained(rng);
        params.apply_themed(&themed);
        params
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[f32]) -> f32 {
    pool[rng.gen_range(0..pool.len())]
}
