#![cfg(not(target_arch = "wasm32"))]

use cellflow::{
    FrameInput, ParameterSampler, PointerSample, RecordingSink, SamplerConfig, SessionOptions,
    Sketch, SketchConfig, ThemeCatalog, ThemedParam, ViewConfig, ViewTransformController,
    ZoomKeys,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn zoom_keys() -> impl Strategy<Value = ZoomKeys> {
    (any::<bool>(), any::<bool>()).prop_map(|(zoom_in, zoom_out)| ZoomKeys { zoom_in, zoom_out })
}

fn pointer() -> impl Strategy<Value = PointerSample> {
    (
        proptest::option::of((-2000.0f64..2000.0, -2000.0f64..2000.0)),
        any::<bool>(),
    )
        .prop_map(|(position, primary_pressed)| PointerSample {
            position,
            primary_pressed,
        })
}

proptest! {
    #[test]
    fn constrained_sampling_is_deterministic_and_in_range(
        theme_idx in 0usize..13,
        seed in any::<u64>(),
    ) {
        let sampler = ParameterSampler::new(ThemeCatalog::builtin(), SamplerConfig::default()).unwrap();
        let theme = &sampler.catalog().list_themes()[theme_idx];
        let a = sampler.sample_constrained(theme.id, &mut StdRng::seed_from_u64(seed));
        let b = sampler.sample_constrained(theme.id, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
        for param in ThemedParam::ALL {
            let range = theme.range(param).unwrap();
            let value = a.get(param).unwrap();
            prop_assert!(range.contains(value), "{} {:?} = {}", theme.id, param, value);
        }
    }

    #[test]
    fn palette_indices_are_distinct_and_in_pool(pool in 2u32..64, seed in any::<u64>()) {
        let config = SamplerConfig { palette_pool: pool, ..SamplerConfig::default() };
        let sampler = ParameterSampler::new(ThemeCatalog::builtin(), config).unwrap();
        let pair = sampler.sample_palette_pair(&mut StdRng::seed_from_u64(seed));
        prop_assert_ne!(pair.first, pair.second);
        prop_assert!(pair.first < pool && pair.second < pool);
    }

    #[test]
    fn scale_stays_banded_and_on_tenths(keys in prop::collection::vec(zoom_keys(), 0..300)) {
        let mut view = ViewTransformController::new(ViewConfig::default());
        for k in keys {
            view.apply_zoom(k);
            let scale = view.transform().scale;
            prop_assert!((2.0..=400.0).contains(&scale));
            let tenths = scale * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-9, "scale {}", scale);
        }
    }

    #[test]
    fn reset_zeroes_pan_whatever_came_before(
        samples in prop::collection::vec((pointer(), zoom_keys()), 0..100),
    ) {
        let mut sketch = Sketch::new(
            SketchConfig::default(),
            &SessionOptions::default(),
            &mut StdRng::seed_from_u64(0),
            RecordingSink::new(),
            (800.0, 1000.0),
        ).unwrap();
        for (i, (pointer, zoom)) in samples.into_iter().enumerate() {
            sketch.frame(FrameInput { pointer, zoom }, i as f64 / 60.0);
        }
        let scale = sketch.view().scale;
        sketch.key_pressed("r");
        let view = sketch.view();
        prop_assert_eq!((view.pan_x, view.pan_y), (0.0, 0.0));
        prop_assert_eq!(view.scale, scale);
    }

    #[test]
    fn time_advances_only_while_free_running(toggles in prop::collection::vec(any::<bool>(), 0..80)) {
        let mut sketch = Sketch::new(
            SketchConfig::default(),
            &SessionOptions::default(),
            &mut StdRng::seed_from_u64(1),
            RecordingSink::new(),
            (800.0, 1000.0),
        ).unwrap();
        for i in 1..=100u32 {
            sketch.frame(FrameInput::default(), f64::from(i));
        }
        let mut free = false;
        let mut last = sketch.animation().elapsed_time;
        for (i, toggle) in toggles.into_iter().enumerate() {
            if toggle {
                sketch.key_pressed("s");
                free = !free;
            }
            let now = 101.0 + i as f64;
            let report = sketch.frame(FrameInput::default(), now);
            prop_assert_eq!(sketch.animation().is_free_running, free);
            if free {
                prop_assert_eq!(report.elapsed_time, now);
            } else {
                prop_assert_eq!(report.elapsed_time, last);
            }
            last = report.elapsed_time;
        }
    }
}
