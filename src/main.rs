//! Host-side preview: `cargo run -- --seed 7` samples a session headless,
//! simulates a run of frames and prints the resulting uniform table.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    preview::run();
}

// The browser entry point lives in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use std::time::{SystemTime, UNIX_EPOCH};

    use cellflow::{
        FrameInput, RecordingSink, SessionOptions, Sketch, SketchConfig, ThemeCatalog,
        UniformValue, SLOTS,
    };
    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser, Debug)]
    #[command(name = "cellflow-preview")]
    struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// theme id, or "random"
        #[arg(long)]
        theme: Option<String>,

        /// frames to simulate at 60 Hz
        #[arg(long, default_value_t = 120)]
        frames: u32,

        /// viewport width in CSS pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// viewport height in CSS pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// toggle free-run once the intro settles
        #[arg(long)]
        free_run: bool,

        /// print the theme catalog and exit
        #[arg(long)]
        list_themes: bool,
    }

    pub fn run() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let args = Args::parse();
        if args.list_themes {
            for theme in ThemeCatalog::builtin().list_themes() {
                println!("{:<10} {:<10} {}", theme.id, theme.name, theme.description);
            }
            return;
        }

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let options = SessionOptions {
            theme: args.theme.clone(),
            ..SessionOptions::default()
        };
        let mut sketch = match Sketch::new(
            SketchConfig::default(),
            &options,
            &mut StdRng::seed_from_u64(seed),
            RecordingSink::new(),
            (args.width, args.height),
        ) {
            Ok(sketch) => sketch,
            Err(err) => {
                eprintln!("cannot start session: {err}");
                std::process::exit(1);
            }
        };

        let intro_frames = SketchConfig::default().clock.intro_frames;
        for i in 1..=args.frames {
            if args.free_run && i == intro_frames + 1 {
                sketch.key_pressed("s");
            }
            let report = sketch.frame(FrameInput::default(), f64::from(i) / 60.0);
            if let Some(status) = report.status {
                println!("frame {:>5}  {status}", report.frame_idx);
            }
        }

        let canvas = sketch.canvas();
        let anim = sketch.animation();
        println!();
        println!("seed      {seed}");
        println!("theme     {} ({})", sketch.theme().name(), sketch.theme().description());
        println!("canvas    {:.1} x {:.1}", canvas.width, canvas.height);
        println!(
            "clock     intro={} free_run={} t={:.3}s",
            anim.has_intro_run, anim.is_free_running, anim.elapsed_time
        );
        println!();
        for slot in SLOTS {
            if let Some(value) = sketch.sink().latest(slot.name) {
                println!("{:<24} {}", slot.name, format_value(value));
            }
        }
    }

    fn format_value(value: UniformValue) -> String {
        match value {
            UniformValue::Float(v) => format!("{v}"),
            UniformValue::Int(v) => format!("{v}"),
            UniformValue::Vec2([x, y]) => format!("({x}, {y})"),
            UniformValue::Vec3([x, y, z]) => format!("({x}, {y}, {z})"),
        }
    }
}
