use cellflow::{
    FrameInput, ParameterSampler, PointerSample, RecordingSink, SamplerConfig, SessionOptions,
    Sketch, SketchConfig, ThemeCatalog, ThemeChoice, UniformValue, ViewConfig, ZoomKeys, SLOTS,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session_with(config: SketchConfig, theme: Option<&str>, seed: u64) -> Sketch<RecordingSink> {
    let options = SessionOptions {
        theme: theme.map(str::to_owned),
        ..SessionOptions::default()
    };
    Sketch::new(
        config,
        &options,
        &mut StdRng::seed_from_u64(seed),
        RecordingSink::new(),
        (1280.0, 800.0),
    )
    .unwrap()
}

fn session(theme: &str) -> Sketch<RecordingSink> {
    session_with(SketchConfig::default(), Some(theme), 1)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn drag_to(x: f64, y: f64) -> FrameInput {
    FrameInput {
        pointer: PointerSample {
            position: Some((x, y)),
            primary_pressed: true,
        },
        zoom: ZoomKeys::default(),
    }
}

#[test]
fn crystal_theme_constrains_core_parameters() {
    let sampler = ParameterSampler::new(ThemeCatalog::builtin(), SamplerConfig::default()).unwrap();
    for seed in 0..64 {
        let p = sampler.sample("crystal", &mut StdRng::seed_from_u64(seed));
        assert!((2.0..=4.0).contains(&p.cell_size), "cell {}", p.cell_size);
        assert!((1000.0..=1500.0).contains(&p.max_depth), "depth {}", p.max_depth);
        assert!((0.02..=0.05).contains(&p.flow_speed), "flow {}", p.flow_speed);
    }
}

#[test]
fn drawn_theme_is_reproducible_from_seed() {
    let a = session_with(SketchConfig::default(), None, 1234);
    let b = session_with(SketchConfig::default(), None, 1234);
    assert_eq!(a.theme().id(), b.theme().id());
    assert_eq!(a.params(), b.params());
}

#[test]
fn initial_push_covers_every_slot_before_first_frame() {
    let s = session("magnetic");
    assert_eq!(s.sink().writes().len(), SLOTS.len());
    assert_eq!(
        s.sink().latest("u_resolution"),
        Some(UniformValue::Vec2([640.0, 800.0]))
    );
    assert!(matches!(s.theme(), ThemeChoice::Preset(t) if t.id == "magnetic"));
}

#[test]
fn hundred_thirty_ticks_without_toggle_freeze_time() {
    let mut s = session("fractal");
    let mut at_100 = 0.0;
    for i in 1..=130 {
        let report = s.frame(idle(), f64::from(i) * 0.016);
        if i == 100 {
            at_100 = report.elapsed_time;
        }
    }
    let anim = s.animation();
    assert!(anim.has_intro_run);
    assert!(!anim.is_free_running);
    assert_eq!(anim.elapsed_time, at_100);
    assert_eq!(
        s.sink().latest("u_time"),
        Some(UniformValue::Float(at_100 as f32))
    );
}

#[test]
fn toggle_only_takes_effect_after_intro() {
    let mut s = session("bloom");
    for i in 1..=50 {
        s.frame(idle(), f64::from(i));
    }
    s.key_pressed("s");
    assert!(!s.animation().is_free_running);

    for i in 51..=100 {
        s.frame(idle(), f64::from(i));
    }
    s.key_pressed("s");
    assert!(s.animation().is_free_running);
    let report = s.frame(idle(), 200.0);
    assert_eq!(report.elapsed_time, 200.0);
}

#[test]
fn drag_moves_pan_by_scaled_delta() {
    let config = SketchConfig {
        view: ViewConfig {
            initial_scale: 10.0,
            ..ViewConfig::default()
        },
        ..SketchConfig::default()
    };
    let mut s = session_with(config, Some("cosmic"), 3);
    s.frame(drag_to(100.0, 100.0), 0.0);
    s.frame(drag_to(90.0, 120.0), 0.016);
    let view = s.view();
    assert_eq!((view.pan_x, view.pan_y), (100.0, 200.0));
    assert_eq!(
        s.sink().latest("u_translation"),
        Some(UniformValue::Vec2([100.0, 200.0]))
    );
}

#[test]
fn reset_returns_to_origin_but_keeps_zoom() {
    let mut s = session("filament");
    let zoom_in = FrameInput {
        zoom: ZoomKeys {
            zoom_in: true,
            zoom_out: false,
        },
        ..FrameInput::default()
    };
    s.frame(zoom_in, 0.0);
    s.frame(drag_to(10.0, 10.0), 0.016);
    s.frame(drag_to(40.0, -5.0), 0.032);
    s.frame(idle(), 0.048);
    let scale = s.view().scale;
    assert_eq!(scale, 40.1);
    assert_ne!(s.view().pan_x, 0.0);

    s.key_pressed("r");
    let report = s.frame(idle(), 0.064);
    assert!(report.redraw_requested);
    assert_eq!((s.view().pan_x, s.view().pan_y, s.view().scale), (0.0, 0.0, scale));
}

#[test]
fn resize_refits_and_pushes_resolution() {
    let mut s = session("particle");
    s.sink_mut().clear();
    let size = s.resize(500.0, 500.0);
    assert_eq!((size.width, size.height), (400.0, 500.0));
    assert_eq!(
        s.sink().writes(),
        &[(
            "u_resolution".to_owned(),
            UniformValue::Vec2([400.0, 500.0])
        )]
    );
}

#[test]
fn session_rejects_degenerate_palette_pool() {
    let mut config = SketchConfig::default();
    config.sampler.palette_pool = 1;
    let result = Sketch::new(
        config,
        &SessionOptions::default(),
        &mut StdRng::seed_from_u64(0),
        RecordingSink::new(),
        (100.0, 100.0),
    );
    assert!(result.is_err());
}
