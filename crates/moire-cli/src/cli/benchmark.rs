//! Benchmark command implementation.

use std::time::Instant;

use moire::{RenderContext, Texture, WavePhases, draw_wallpaper};

use crate::device::{SoftwareDevice, slate_tile};

use super::{next_value, parse_kind, parse_num};

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let mut kind_name = "animated".to_string();
    let mut frames: u32 = 120;
    let mut width: i32 = 640;
    let mut height: i32 = 480;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--mode" => {
                kind_name = next_value(args, &mut i, "--mode").to_string();
            }
            "-n" | "--frames" => {
                frames = parse_num(next_value(args, &mut i, "--frames"), "--frames");
            }
            "--width" => {
                width = parse_num(next_value(args, &mut i, "--width"), "--width");
            }
            "--height" => {
                height = parse_num(next_value(args, &mut i, "--height"), "--height");
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if frames == 0 {
        eprintln!("Error: frame count must be at least 1");
        std::process::exit(1);
    }

    let kind = parse_kind(&kind_name);

    println!("Preparing {}x{} software device...", width, height);
    let start_setup = Instant::now();

    let mut device = SoftwareDevice::new(width as u32, height as u32);
    device.register_texture(1, slate_tile());
    let texture = Texture { handle: 1, x: 0, y: 0, width: 64, height: 64 };
    let mut phases = WavePhases::new();

    let setup_time = start_setup.elapsed();
    println!("Setup done in {:?}", setup_time);

    println!("\nRendering '{}' for {} frames...", kind.name(), frames);
    let start = Instant::now();

    for _ in 0..frames {
        device.clear_frame();
        let mut ctx = RenderContext::new(width, height);
        draw_wallpaper(&mut ctx, &mut device, &texture, kind, 1, &mut phases);
    }

    let elapsed = start.elapsed();
    let total_ms = elapsed.as_secs_f64() * 1000.0;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  MOIRE BENCHMARK: {}", kind.name().to_uppercase());
    println!("═══════════════════════════════════════════════");
    println!("  Resolution: {}x{}", width, height);
    println!("  Frames: {}", frames);
    println!("  Triangles drawn: {}", device.draw_calls() * 2);
    println!("  Time: {:?}", elapsed);
    println!("  Time (ms): {:.2}", total_ms);
    println!("  Per frame: {:.3}ms", total_ms / frames as f64);
    println!("  Frames/sec: {:.1}", frames as f64 / elapsed.as_secs_f64());
    println!("═══════════════════════════════════════════════");
}

fn print_usage() {
    eprintln!("Usage: moire benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mode <kind>    Wallpaper kind (default: animated)");
    eprintln!("  -n, --frames <n>     Frames to render (default: 120)");
    eprintln!("      --width <px>     Screen width (default: 640)");
    eprintln!("      --height <px>    Screen height (default: 480)");
    eprintln!();
    eprintln!("Benchmarks software rasterization performance.");
}
