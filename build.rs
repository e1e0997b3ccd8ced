// Stage the static site (index.html, shaders) into `dist/`. The wasm bundle
// itself is produced by `wasm-pack build --target web --out-dir dist/pkg`.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if let Err(err) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create dist/: {err}");
        return;
    }

    // Keep dist/pkg from an earlier wasm-pack run; only refresh static files.
    let options = CopyOptions::new().overwrite(true).content_only(true);
    if let Err(err) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=failed to stage static assets: {err}");
    }
}
