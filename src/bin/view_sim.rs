//! First-person walk around the polygonal fixture maps.
//!
//! ```bash
//! cargo run --bin view_sim -- --map triangle
//! ```
//!
//! Arrows or WASD move and turn, Q/E nudge the eye height, Escape
//! quits. `--block` swaps the per-line register copy for the
//! block-copy delivery; the picture must not change.

use clap::{Parser, ValueEnum};
use minifb::{Key, Window, WindowOptions};
use simplelog::TermLogger;

use rowcast::display::{Atlas, SimDisplay};
use rowcast::engine::FrameRenderer;
use rowcast::fixed::lut::{SCREEN_H, SCREEN_W};
use rowcast::fixed::{Angle, Fixed, FxVec2};
use rowcast::hw::{Delivery, FrameSwap};
use rowcast::map::{self, Camera};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fixture {
    Triangle,
    Square,
}

#[derive(Parser)]
#[command(about = "BSP-path demo: polygonal fixture maps in a window")]
struct Args {
    /// Fixture map to walk around.
    #[arg(long, value_enum, default_value = "triangle")]
    map: Fixture,

    /// Window upscale factor.
    #[arg(long, default_value_t = 4)]
    scale: usize,

    /// Deliver registers through the block-copy engine.
    #[arg(long)]
    block: bool,

    /// Log verbosity.
    #[arg(long, default_value = "info")]
    log: log::LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    TermLogger::init(
        args.log,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let (map, start) = match args.map {
        Fixture::Triangle => (map::sample::triangle_in_box(), FxVec2::from_ints(-20, 30)),
        Fixture::Square => (map::sample::split_square(), FxVec2::from_ints(-60, 0)),
    };
    map.validate()?;

    let atlas = Atlas::checkered(64, 3);
    let mut renderer = FrameRenderer::new(atlas.geo(), Fixed::from_int(50));
    let mut display = SimDisplay::new(atlas);
    let mut swap = FrameSwap::new();
    let mut delivery = if args.block {
        Delivery::block()
    } else {
        Delivery::per_line()
    };

    let mut cam = Camera::new(start, Angle::ZERO);

    let (w, h) = (SCREEN_H * args.scale, SCREEN_W * args.scale);
    let mut window = Window::new("rowcast - view_sim", w, h, WindowOptions::default())?;
    window.set_target_fps(60);
    let mut out = vec![0u32; w * h];

    let move_step = Fixed::from_f32(2.0);
    let turn_step = Angle::from_degrees(2.0);
    let height_step = Fixed::from_f32(0.02);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        /* the simulation layer: drive the pose from the keyboard */
        if window.is_key_down(Key::W) || window.is_key_down(Key::Up) {
            cam.step(move_step, Fixed::ZERO);
        }
        if window.is_key_down(Key::S) || window.is_key_down(Key::Down) {
            cam.step(-move_step, Fixed::ZERO);
        }
        if window.is_key_down(Key::A) {
            cam.step(Fixed::ZERO, -move_step);
        }
        if window.is_key_down(Key::D) {
            cam.step(Fixed::ZERO, move_step);
        }
        if window.is_key_down(Key::Left) {
            cam.turn(turn_step);
        }
        if window.is_key_down(Key::Right) {
            cam.turn(-turn_step);
        }
        if window.is_key_down(Key::Q) {
            cam.height = cam.height + height_step;
        }
        if window.is_key_down(Key::E) {
            cam.height = cam.height - height_step;
        }

        /* frame N: compute into the back buffer */
        renderer.render(&map, &cam, swap.back_mut());

        /* vertical blank: commit, then deliver line by line */
        swap.publish();
        delivery.on_vblank(&swap, &mut display);
        for vcount in 0..SCREEN_H {
            display.scanline(vcount);
            delivery.on_hblank(vcount, &swap, &mut display);
        }

        upscale_rotated(display.frame(), &mut out, args.scale);
        window.update_with_buffer(&out, w, h)?;
    }
    Ok(())
}

/// The hardware scans sideways; stand the frame upright and upscale.
fn upscale_rotated(frame: &[u32], out: &mut [u32], scale: usize) {
    let w = SCREEN_H * scale;
    let h = SCREEN_W * scale;
    for oy in 0..h {
        for ox in 0..w {
            let row = ox / scale;
            let col = SCREEN_W - 1 - oy / scale;
            out[oy * w + ox] = frame[row * SCREEN_W + col];
        }
    }
}
