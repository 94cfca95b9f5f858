//! CLI command implementations.
//!
//! - `render` - Rasterize wallpaper frames to PNG
//! - `trace` - Dump a frame's device-call stream as JSON
//! - `benchmark` - Benchmark frame generation and rasterization
//! - `modes` - List wallpaper kinds (handled in main)

pub mod benchmark;
pub mod render;
pub mod trace;

pub use benchmark::cmd_benchmark;
pub use render::cmd_render;
pub use trace::cmd_trace;

use moire::WallpaperKind;

/// Parse a wallpaper kind argument or exit with a hint.
pub fn parse_kind(name: &str) -> WallpaperKind {
    WallpaperKind::from_name(name).unwrap_or_else(|| {
        eprintln!("Unknown wallpaper kind: {}", name);
        eprintln!(
            "Available: {}",
            WallpaperKind::all()
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        std::process::exit(1);
    })
}

/// Pull the value following an option flag or exit.
pub fn next_value<'a>(args: &'a [String], i: &mut usize, option: &str) -> &'a str {
    *i += 1;
    if *i >= args.len() {
        eprintln!("Missing value for {}", option);
        std::process::exit(1);
    }
    &args[*i]
}

/// Parse a numeric option value or exit.
pub fn parse_num<T: std::str::FromStr>(value: &str, option: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {}: {}", option, value);
        std::process::exit(1);
    })
}
