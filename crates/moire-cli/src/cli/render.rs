//! Render command implementation: rasterize wallpaper frames to PNG.

use std::time::Instant;

use moire::{RenderContext, Texture, WavePhases, draw_wallpaper};

use crate::device::{SoftwareDevice, slate_tile};

use super::{next_value, parse_kind, parse_num};

/// Execute the render command.
pub fn cmd_render(args: &[String]) {
    let mut kind_name = "animated".to_string();
    let mut width: u32 = 640;
    let mut height: u32 = 480;
    let mut frames: u32 = 1;
    let mut frame_speed: i32 = 1;
    let mut output: Option<String> = None;

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
            "-n" | "--frames" => {
                frames = parse_num(next_value(args, &mut i, "--frames"), "--frames");
            }
            "-s" | "--speed" => {
                frame_speed = parse_num(next_value(args, &mut i, "--speed"), "--speed");
            }
            "-o" | "--out" => {
                output = Some(next_value(args, &mut i, "--out").to_string());
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
    let stem = output.unwrap_or_else(|| {
        format!(
            "moire-{}-{}.png",
            kind.name(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        )
    });

    let mut device = SoftwareDevice::new(width, height);
    device.register_texture(1, slate_tile());
    let texture = Texture { handle: 1, x: 0, y: 0, width: 64, height: 64 };
    let mut phases = WavePhases::new();

    let start = Instant::now();
    for frame in 0..frames {
        device.clear_frame();
        let mut ctx = RenderContext::new(width as i32, height as i32);
        draw_wallpaper(&mut ctx, &mut device, &texture, kind, frame_speed, &mut phases);

        let path = if frames == 1 {
            stem.clone()
        } else {
            numbered_path(&stem, frame)
        };
        device.frame().save(&path).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        });
        println!("Wrote {}", path);
    }

    println!(
        "Rendered {} {}x{} frame(s) in {:.1}ms",
        frames,
        width,
        height,
        start.elapsed().as_secs_f64() * 1000.0
    );
}

/// Insert a zero-padded frame number before the extension.
fn numbered_path(stem: &str, frame: u32) -> String {
    match stem.rsplit_once('.') {
        Some((base, ext)) => format!("{}-{:04}.{}", base, frame, ext),
        None => format!("{}-{:04}", stem, frame),
    }
}

fn print_usage() {
    eprintln!("Usage: moire render [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mode <kind>     Wallpaper kind (default: animated)");
    eprintln!("      --width <px>      Frame width (default: 640)");
    eprintln!("      --height <px>     Frame height (default: 480)");
    eprintln!("  -n, --frames <n>      Number of frames (default: 1)");
    eprintln!("  -s, --speed <f>       Frame-speed factor, 0 freezes (default: 1)");
    eprintln!("  -o, --out <file.png>  Output path (default: timestamped name)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_paths_keep_the_extension() {
        assert_eq!(numbered_path("out.png", 3), "out-0003.png");
        assert_eq!(numbered_path("frames/a.b.png", 12), "frames/a.b-0012.png");
        assert_eq!(numbered_path("noext", 1), "noext-0001");
    }
}
