//! Trace command implementation: dump one frame's device-call stream.
//!
//! Runs a frame against the engine's [`RecordingDevice`] and prints the
//! recorded calls as JSON, which is handy for diffing frames, feeding
//! tooling, or eyeballing the state-elision behavior.

use serde::Serialize;

use moire::{
    DeviceCall, RecordingDevice, RenderContext, Texture, WavePhases, draw_wallpaper,
};

use super::{next_value, parse_kind, parse_num};

/// Trace output document.
#[derive(Serialize)]
struct Trace<'a> {
    mode: &'a str,
    width: i32,
    height: i32,
    draw_calls: usize,
    state_calls: usize,
    phases_after: WavePhases,
    calls: &'a [DeviceCall],
}

/// Execute the trace command.
pub fn cmd_trace(args: &[String]) {
    let mut kind_name = "static".to_string();
    let mut width: i32 = 640;
    let mut height: i32 = 480;
    let mut compact = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--mode" => {
                kind_name = next_value(args, &mut i, "--mode").to_string();
            }
            "--width" => {
                width = parse_num(next_value(args, &mut i, "--width"), "--width");
            }
            "--height" => {
                height = parse_num(next_value(args, &mut i, "--height"), "--height");
            }
            "--compact" => {
                compact = true;
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

    let kind = parse_kind(&kind_name);
    let mut ctx = RenderContext::new(width, height);
    let mut device = RecordingDevice::new();
    let texture = Texture { handle: 1, x: 0, y: 0, width: 64, height: 64 };
    let mut phases = WavePhases::new();

    draw_wallpaper(&mut ctx, &mut device, &texture, kind, 1, &mut phases);

    let state_calls = device
        .calls
        .iter()
        .filter(|c| matches!(c, DeviceCall::SetRenderState { .. }))
        .count();

    let trace = Trace {
        mode: kind.name(),
        width,
        height,
        draw_calls: device.draw_calls(),
        state_calls,
        phases_after: phases,
        calls: &device.calls,
    };

    let json = if compact {
        serde_json::to_string(&trace)
    } else {
        serde_json::to_string_pretty(&trace)
    }
    .expect("Failed to serialize JSON");
    println!("{}", json);
}

fn print_usage() {
    eprintln!("Usage: moire trace [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mode <kind>   Wallpaper kind (default: static)");
    eprintln!("      --width <px>    Screen width (default: 640)");
    eprintln!("      --height <px>   Screen height (default: 480)");
    eprintln!("      --compact       Single-line JSON output");
}
